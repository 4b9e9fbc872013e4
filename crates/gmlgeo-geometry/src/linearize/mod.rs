//! Linearization: approximating curved segments by straight line strings.
//!
//! Arcs and circles are sampled on their circumcircle, arc strings arc by
//! arc, and cubic splines through a natural spline fit. The density is
//! controlled by a [`LinearizationCriterion`].

mod arc;
mod spline;

use gmlgeo_core::{GeoError, Result, Tolerance};
use gmlgeo_math::are_collinear;
use serde::{Deserialize, Serialize};

use crate::curve::{
    append_joined, ArcSegment, ArcString, Curve, CurveKind, CurveSegment, LineStringSegment,
};

/// How densely curved segments are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinearizationCriterion {
    /// Exactly `count` points per arc (or per spline).
    NumPoints { count: usize },
    /// As many points as needed to keep the chord error below `max_error`,
    /// but at most `max_num_points` (`0` = no cap).
    MaxError { max_error: f64, max_num_points: usize },
}

impl LinearizationCriterion {
    pub fn num_points(count: usize) -> Self {
        Self::NumPoints { count }
    }

    pub fn max_error(max_error: f64, max_num_points: usize) -> Self {
        Self::MaxError {
            max_error,
            max_num_points,
        }
    }
}

/// Converts curves into line strings.
///
/// The only state is the tolerance, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Linearizer {
    tolerance: Tolerance,
}

impl Linearizer {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Linearize a whole curve.
    ///
    /// Line strings and linear rings are returned unchanged, rings are
    /// linearized member by member and stay rings.
    pub fn linearize(&self, curve: &Curve, crit: &LinearizationCriterion) -> Result<Curve> {
        let kind = match &curve.kind {
            CurveKind::LineString { .. } => return Ok(curve.clone()),
            CurveKind::Ring(members) => CurveKind::Ring(
                members
                    .iter()
                    .map(|m| self.linearize(m, crit))
                    .collect::<Result<_>>()?,
            ),
            CurveKind::Segments(segments) => CurveKind::Segments(
                segments
                    .iter()
                    .map(|s| self.linearize_segment(s, crit).map(CurveSegment::LineString))
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(Curve {
            id: curve.id.clone(),
            crs: curve.crs.clone(),
            kind,
        })
    }

    /// Linearize a single segment.
    pub fn linearize_segment(
        &self,
        segment: &CurveSegment,
        crit: &LinearizationCriterion,
    ) -> Result<LineStringSegment> {
        match segment {
            CurveSegment::LineString(s) => Ok(s.clone()),
            CurveSegment::Arc(a) => self.linearize_arc(a, false, crit),
            CurveSegment::Circle(a) => self.linearize_arc(a, true, crit),
            CurveSegment::ArcString(s) => self.linearize_arc_string(s, crit),
            CurveSegment::CubicSpline(s) => self.linearize_cubic_spline(s, crit),
            CurveSegment::GeodesicString(points) => Ok(LineStringSegment::new(points.clone())),
            CurveSegment::Unsupported(kind) => {
                Err(GeoError::UnsupportedSegmentKind(kind.to_string()))
            }
        }
    }

    /// Linearize an arc, or a full circle when `is_circle` is set.
    ///
    /// Collinear control points are not interpolated: an arc degrades to
    /// `(p0, p2)`, a circle to `(p0, p1, p0)`.
    pub fn linearize_arc(
        &self,
        arc: &ArcSegment,
        is_circle: bool,
        crit: &LinearizationCriterion,
    ) -> Result<LineStringSegment> {
        let [p0, p1, p2] = &arc.points;
        if are_collinear(p0.xy(), p1.xy(), p2.xy()) {
            let points = if is_circle {
                vec![p0.clone(), p1.clone(), p0.clone()]
            } else {
                vec![p0.clone(), p2.clone()]
            };
            return Ok(LineStringSegment::new(points));
        }

        let num_points = self.arc_point_count(arc, is_circle, crit)?;
        let points = arc::interpolate(p0, p1, p2, num_points, is_circle, self.tolerance)?;
        Ok(LineStringSegment::new(points))
    }

    /// Linearize an arc string arc by arc; collinear triples are kept as
    /// straight runs. Consecutive arcs share their boundary point.
    pub fn linearize_arc_string(
        &self,
        arc_string: &ArcString,
        crit: &LinearizationCriterion,
    ) -> Result<LineStringSegment> {
        let src = &arc_string.points;
        if src.len() < 3 || src.len() % 2 == 0 {
            return Err(GeoError::InvalidGeometry(format!(
                "arc string requires an odd number of at least 3 control points, got {}",
                src.len()
            )));
        }

        let mut points = Vec::with_capacity(src.len());
        for triple in src.windows(3).step_by(2) {
            let arc = ArcSegment::new(triple[0].clone(), triple[1].clone(), triple[2].clone());
            let run = if are_collinear(triple[0].xy(), triple[1].xy(), triple[2].xy()) {
                triple.to_vec()
            } else {
                let num_points = self.arc_point_count(&arc, false, crit)?;
                arc::interpolate(
                    &triple[0],
                    &triple[1],
                    &triple[2],
                    num_points,
                    false,
                    self.tolerance,
                )?
            };
            append_joined(&mut points, &run);
        }
        Ok(LineStringSegment::new(points))
    }

    fn arc_point_count(
        &self,
        arc: &ArcSegment,
        is_circle: bool,
        crit: &LinearizationCriterion,
    ) -> Result<usize> {
        match *crit {
            LinearizationCriterion::NumPoints { count } => Ok(count),
            LinearizationCriterion::MaxError {
                max_error,
                max_num_points,
            } => {
                let [p0, p1, p2] = &arc.points;
                let mut num_points = arc::num_points_for_error(
                    p0.xy(),
                    p1.xy(),
                    p2.xy(),
                    is_circle,
                    max_error,
                    self.tolerance,
                )?;
                if max_num_points > 0 && max_num_points < num_points {
                    num_points = max_num_points;
                }
                if num_points == usize::MAX {
                    return Err(GeoError::InvalidCriterion(format!(
                        "max error {max_error} is too small for an arc without a point cap"
                    )));
                }
                log::debug!("Using {} points for segment linearization", num_points);
                Ok(num_points)
            }
        }
    }
}
