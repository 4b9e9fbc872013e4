//! Validation of GML geometries on their planar form.
//!
//! Curved geometries are linearized and converted to `geo` geometries by a
//! [`PlanarConverter`]. The validators then report into a
//! [`ValidationResult`]:
//!
//! - [`Validator::Simplicity`] (id 3): no self-intersections.
//! - [`Validator::PolygonPatchConnectivity`] (id 1): the patches of each
//!   surface form a single polygon.

pub mod context;
pub mod format;
pub mod planar;
pub mod result;
pub mod validator;

pub use context::ElementContext;
pub use planar::{union_of_patches, union_polygons, LinearizingConverter, PlanarConverter};
pub use result::{keys, Coordinate, Diagnostic, Severity, ValidationResult};
pub use validator::connectivity::check_connectivity;
pub use validator::simple::{check_simple, Simplicity};
pub use validator::{ValidationConfig, ValidationPipeline, Validator};
