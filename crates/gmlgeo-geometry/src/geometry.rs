//! The curved geometry tree handed to the validators.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::point::Point;
use crate::surface::{Solid, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiKind {
    MultiPoint,
    MultiCurve,
    MultiSurface,
    MultiSolid,
    MultiGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeKind {
    CompositeCurve,
    GeometricComplex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiGeometry {
    pub id: Option<String>,
    pub kind: MultiKind,
    pub members: Vec<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGeometry {
    pub id: Option<String>,
    pub kind: CompositeKind,
    pub members: Vec<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Curve(Curve),
    Surface(Surface),
    Solid(Solid),
    Multi(MultiGeometry),
    Composite(CompositeGeometry),
    /// A geometry kind this crate does not model (e.g. `Envelope`, `Tin`).
    Unsupported(String),
}

impl Geometry {
    pub fn multi(kind: MultiKind, members: Vec<Geometry>) -> Self {
        Geometry::Multi(MultiGeometry {
            id: None,
            kind,
            members,
        })
    }

    pub fn composite(kind: CompositeKind, members: Vec<Geometry>) -> Self {
        Geometry::Composite(CompositeGeometry {
            id: None,
            kind,
            members,
        })
    }

    /// Name of the geometry kind, for diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            Geometry::Point(_) => "Point".to_string(),
            Geometry::Curve(_) => "Curve".to_string(),
            Geometry::Surface(s) => format!("{:?}", s.kind),
            Geometry::Solid(s) => format!("{:?}", s.kind),
            Geometry::Multi(m) => format!("{:?}", m.kind),
            Geometry::Composite(c) => format!("{:?}", c.kind),
            Geometry::Unsupported(kind) => kind.clone(),
        }
    }

    /// Solids and multi-solids.
    pub fn is_solid(&self) -> bool {
        matches!(self, Geometry::Solid(_))
            || matches!(self, Geometry::Multi(m) if m.kind == MultiKind::MultiSolid)
    }
}
