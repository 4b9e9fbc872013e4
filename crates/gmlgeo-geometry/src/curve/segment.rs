//! Curve segment variants.

use std::fmt;

use gmlgeo_math::Vector2;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// GML curve segment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    LineString,
    Arc,
    Circle,
    ArcString,
    CubicSpline,
    GeodesicString,
    ArcByBulge,
    ArcByCenterPoint,
    ArcStringByBulge,
    Bezier,
    BSpline,
    CircleByCenterPoint,
    Clothoid,
    Geodesic,
    OffsetCurve,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Straight segments through a run of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStringSegment {
    pub points: Vec<Point>,
}

impl LineStringSegment {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Circular arc through three points; for a circle the arc returns to `points[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub points: [Point; 3],
}

impl ArcSegment {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }
}

/// Sequence of arcs sharing end points: `(p0, p1, p2), (p2, p3, p4), ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcString {
    pub points: Vec<Point>,
}

impl ArcString {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Interpolating cubic spline with prescribed tangents at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicSpline {
    pub control_points: Vec<Point>,
    pub vector_at_start: Vector2,
    pub vector_at_end: Vector2,
}

impl CubicSpline {
    pub fn new(control_points: Vec<Point>, vector_at_start: Vector2, vector_at_end: Vector2) -> Self {
        Self {
            control_points,
            vector_at_start,
            vector_at_end,
        }
    }

    /// Largest dimension among the control points.
    pub fn coordinate_dimension(&self) -> usize {
        self.control_points.iter().map(|p| p.dim).max().unwrap_or(2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveSegment {
    LineString(LineStringSegment),
    Arc(ArcSegment),
    Circle(ArcSegment),
    ArcString(ArcString),
    CubicSpline(CubicSpline),
    /// Geodesic interpolation between control points; handled as already linear.
    GeodesicString(Vec<Point>),
    Unsupported(SegmentKind),
}

impl CurveSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            CurveSegment::LineString(_) => SegmentKind::LineString,
            CurveSegment::Arc(_) => SegmentKind::Arc,
            CurveSegment::Circle(_) => SegmentKind::Circle,
            CurveSegment::ArcString(_) => SegmentKind::ArcString,
            CurveSegment::CubicSpline(_) => SegmentKind::CubicSpline,
            CurveSegment::GeodesicString(_) => SegmentKind::GeodesicString,
            CurveSegment::Unsupported(kind) => *kind,
        }
    }

    pub fn control_points(&self) -> &[Point] {
        match self {
            CurveSegment::LineString(s) => &s.points,
            CurveSegment::Arc(a) | CurveSegment::Circle(a) => &a.points,
            CurveSegment::ArcString(s) => &s.points,
            CurveSegment::CubicSpline(s) => &s.control_points,
            CurveSegment::GeodesicString(points) => points,
            CurveSegment::Unsupported(_) => &[],
        }
    }

    pub fn start_point(&self) -> Option<&Point> {
        self.control_points().first()
    }

    pub fn end_point(&self) -> Option<&Point> {
        match self {
            CurveSegment::Circle(a) => Some(&a.points[0]),
            _ => self.control_points().last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_ends_where_it_starts() {
        let circle = CurveSegment::Circle(ArcSegment::new(
            Point::new_2d(1.0, 0.0),
            Point::new_2d(0.0, 1.0),
            Point::new_2d(-1.0, 0.0),
        ));
        assert_eq!(circle.start_point(), circle.end_point());
        assert_eq!(circle.kind(), SegmentKind::Circle);
    }

    #[test]
    fn test_unsupported_has_no_points() {
        let seg = CurveSegment::Unsupported(SegmentKind::Clothoid);
        assert!(seg.control_points().is_empty());
        assert_eq!(seg.kind().to_string(), "Clothoid");
    }

    #[test]
    fn test_spline_dimension() {
        let spline = CubicSpline::new(
            vec![Point::new_2d(0.0, 0.0), Point::new_3d(1.0, 1.0, 1.0)],
            Vector2::X,
            Vector2::X,
        );
        assert_eq!(spline.coordinate_dimension(), 3);
    }
}
