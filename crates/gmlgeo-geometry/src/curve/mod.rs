//! Curves: line strings, segmented curves and rings.

mod segment;

use serde::{Deserialize, Serialize};

use crate::point::{CrsRef, Point};

pub use segment::{
    ArcSegment, ArcString, CubicSpline, CurveSegment, LineStringSegment, SegmentKind,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveKind {
    /// `LineString`, or `LinearRing` when `closed` is set.
    LineString { points: Vec<Point>, closed: bool },
    /// A curve made of consecutive segments.
    Segments(Vec<CurveSegment>),
    /// Closed ring assembled from member curves, end to end.
    Ring(Vec<Curve>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub id: Option<String>,
    pub crs: Option<CrsRef>,
    pub kind: CurveKind,
}

impl Curve {
    pub fn new(kind: CurveKind) -> Self {
        Self {
            id: None,
            crs: None,
            kind,
        }
    }

    pub fn line_string(points: Vec<Point>) -> Self {
        Self::new(CurveKind::LineString {
            points,
            closed: false,
        })
    }

    pub fn linear_ring(points: Vec<Point>) -> Self {
        Self::new(CurveKind::LineString {
            points,
            closed: true,
        })
    }

    pub fn from_segments(segments: Vec<CurveSegment>) -> Self {
        Self::new(CurveKind::Segments(segments))
    }

    pub fn ring(members: Vec<Curve>) -> Self {
        Self::new(CurveKind::Ring(members))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_crs(mut self, crs: CrsRef) -> Self {
        self.crs = Some(crs);
        self
    }

    /// True when every part is made of straight segments only.
    pub fn is_linear(&self) -> bool {
        match &self.kind {
            CurveKind::LineString { .. } => true,
            CurveKind::Segments(segments) => segments
                .iter()
                .all(|s| matches!(s, CurveSegment::LineString(_))),
            CurveKind::Ring(members) => members.iter().all(Curve::is_linear),
        }
    }

    /// Control points of all parts in order; a point shared by consecutive
    /// parts is listed once.
    pub fn points(&self) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::new();
        self.collect_points(&mut out);
        out
    }

    fn collect_points(&self, out: &mut Vec<Point>) {
        match &self.kind {
            CurveKind::LineString { points, .. } => append_joined(out, points),
            CurveKind::Segments(segments) => {
                for segment in segments {
                    append_joined(out, segment.control_points());
                }
            }
            CurveKind::Ring(members) => {
                for member in members {
                    member.collect_points(out);
                }
            }
        }
    }
}

/// Append `points`, skipping the first one if it repeats the current last point.
pub(crate) fn append_joined(out: &mut Vec<Point>, points: &[Point]) {
    let skip = match (out.last(), points.first()) {
        (Some(last), Some(first)) => usize::from(last.coords == first.coords),
        _ => 0,
    };
    out.extend(points.iter().skip(skip).cloned());
}
