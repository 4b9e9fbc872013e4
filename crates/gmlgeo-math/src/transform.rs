use crate::{Aabb2, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Translation that moves a group of points next to the origin.
///
/// Circle fitting on coordinates with large absolute values (projected
/// CRS, metres) loses precision; working in a local frame centred on the
/// points keeps the magnitudes small.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub offset: Vector2,
}

impl Shift {
    pub fn identity() -> Self {
        Self {
            offset: Vector2::ZERO,
        }
    }

    /// Shift by the midpoint of the bounding box extent, independently per axis.
    pub fn centering(points: &[Point2]) -> Self {
        let offset = Aabb2::from_points(points).map_or(Vector2::ZERO, |b| b.center());
        Self { offset }
    }

    pub fn to_local(&self, p: Point2) -> Point2 {
        p - self.offset
    }

    pub fn to_world(&self, p: Point2) -> Point2 {
        p + self.offset
    }
}

impl Default for Shift {
    fn default() -> Self {
        Self::identity()
    }
}
