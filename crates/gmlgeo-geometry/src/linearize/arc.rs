//! Sampling of circular arcs given by three points.

use std::f64::consts::TAU;

use gmlgeo_core::{GeoError, Result, Tolerance};
use gmlgeo_math::{circumcenter, is_clockwise, Point2, Shift};

use crate::point::Point;

/// Circle through the three control points, in a frame centred on them.
struct ArcFit {
    shift: Shift,
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
    full_circle: bool,
}

impl ArcFit {
    fn new(p0: Point2, p1: Point2, p2: Point2, is_circle: bool, tol: Tolerance) -> Result<Self> {
        let shift = Shift::centering(&[p0, p1, p2]);
        let (a, b, c) = (shift.to_local(p0), shift.to_local(p1), shift.to_local(p2));

        let center = circumcenter(a, b, c)?;
        let clockwise = is_clockwise(a, b, c)?;

        let d = a - center;
        let start_angle = d.y.atan2(d.x);
        let end_angle = if is_circle {
            start_angle
        } else {
            let e = c - center;
            e.y.atan2(e.x)
        };

        Ok(Self {
            shift,
            center,
            radius: d.length(),
            start_angle,
            end_angle,
            clockwise,
            full_circle: tol.angular_eq(start_angle, end_angle),
        })
    }

    /// Unsigned angle covered when travelling from start to end in the
    /// arc's direction.
    fn sweep(&self) -> f64 {
        if self.full_circle {
            return TAU;
        }
        let delta = if self.clockwise {
            self.start_angle - self.end_angle
        } else {
            self.end_angle - self.start_angle
        };
        if delta < 0.0 {
            delta + TAU
        } else {
            delta
        }
    }

    /// Signed angle between consecutive samples.
    fn angle_step(&self, num_points: usize) -> f64 {
        let step = self.sweep() / (num_points - 1) as f64;
        if self.clockwise {
            -step
        } else {
            step
        }
    }
}

/// Minimal number of points keeping every chord within `max_error` of the arc.
///
/// Saturates at `usize::MAX` when `max_error` is too small for the radius.
pub(super) fn num_points_for_error(
    p0: Point2,
    p1: Point2,
    p2: Point2,
    is_circle: bool,
    max_error: f64,
    tol: Tolerance,
) -> Result<usize> {
    if !(max_error > 0.0) {
        return Err(GeoError::InvalidCriterion(format!(
            "max error must be positive, got {max_error}"
        )));
    }
    let fit = ArcFit::new(p0, p1, p2, is_circle, tol)?;
    let cos_half = (1.0 - max_error / fit.radius).clamp(-1.0, 1.0);
    let max_step = 2.0 * cos_half.acos();
    // max_error below the f64 resolution of the radius: no finite count exists
    let chords = (fit.sweep() / max_step).ceil();
    let count = if max_step > 0.0 && chords.is_finite() && chords < usize::MAX as f64 {
        (chords as usize).saturating_add(1)
    } else {
        usize::MAX
    };
    // a closed run needs at least a triangle
    let min = if fit.full_circle { 4 } else { 2 };
    Ok(count.max(min))
}

/// Sample `num_points` points along the arc `p0 -> p1 -> p2` (or the full
/// circle through them).
///
/// The first point is `p0` and the last is `p2` (`p0` for a circle), copied
/// from the input rather than recomputed. The tolerance pads the radius of
/// the interior samples.
pub(super) fn interpolate(
    p0: &Point,
    p1: &Point,
    p2: &Point,
    num_points: usize,
    is_circle: bool,
    tol: Tolerance,
) -> Result<Vec<Point>> {
    if num_points < 2 {
        return Err(GeoError::InvalidPointCount(num_points));
    }
    let fit = ArcFit::new(p0.xy(), p1.xy(), p2.xy(), is_circle, tol)?;
    let radius = fit.radius + tol.linear;
    let step = fit.angle_step(num_points);

    let z0 = p0.coords.z;
    let z_span = if is_circle { 0.0 } else { p2.coords.z - z0 };
    let last = (num_points - 1) as f64;

    let mut points = Vec::with_capacity(num_points);
    points.push(p0.clone());
    for i in 1..num_points - 1 {
        let angle = fit.start_angle + i as f64 * step;
        let local = fit.center + radius * Point2::new(angle.cos(), angle.sin());
        let z = z0 + z_span * i as f64 / last;
        points.push(p0.sibling(fit.shift.to_world(local), z));
    }
    points.push(if is_circle { p0.clone() } else { p2.clone() });
    Ok(points)
}
