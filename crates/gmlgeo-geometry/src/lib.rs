//! GML geometry model and curve linearization.

pub mod curve;
pub mod geometry;
pub mod linearize;
pub mod point;
pub mod surface;

pub use curve::{
    ArcSegment, ArcString, CubicSpline, Curve, CurveKind, CurveSegment, LineStringSegment,
    SegmentKind,
};
pub use geometry::{CompositeGeometry, CompositeKind, Geometry, MultiGeometry, MultiKind};
pub use linearize::{LinearizationCriterion, Linearizer};
pub use point::{CrsRef, Point, PrecisionModel};
pub use surface::{PolygonPatch, Solid, SolidKind, Surface, SurfaceKind, SurfacePatch};
