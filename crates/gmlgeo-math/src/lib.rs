pub mod aabb;
pub mod circle;
pub mod transform;

pub use glam::{DVec2, DVec3};
pub use aabb::Aabb2;
pub use circle::{are_collinear, circumcenter, is_clockwise, signed_area, EPSILON};
pub use transform::Shift;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
