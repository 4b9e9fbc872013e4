//! Cubic spline linearization.
//!
//! The spline is a piecewise cubic `S_j(x) = a_j + b_j (x - x_j) + c_j (x - x_j)^2 + d_j (x - x_j)^3`
//! on `[x_j, x_j+1]`, fitted through the control points with clamped end
//! slopes. The `c_j` come from a tridiagonal system, the rest follows.

use gmlgeo_core::{GeoError, Result};
use gmlgeo_math::{Point2, Vector2};
use nalgebra::{DMatrix, DVector};

use super::{LinearizationCriterion, Linearizer};
use crate::curve::{CubicSpline, LineStringSegment};
use crate::point::Point;

impl Linearizer {
    /// Linearize a 2D cubic spline into `numPoints` samples evenly spaced on x.
    ///
    /// Control points must be monotonic on x. A max error criterion only
    /// works with a positive `max_num_points`, which is then used as the count.
    pub fn linearize_cubic_spline(
        &self,
        spline: &CubicSpline,
        crit: &LinearizationCriterion,
    ) -> Result<LineStringSegment> {
        let dim = spline.coordinate_dimension();
        if dim != 2 {
            return Err(GeoError::UnsupportedDimension(dim));
        }
        let control = &spline.control_points;
        if control.len() < 2 {
            return Err(GeoError::InvalidGeometry(format!(
                "cubic spline requires at least 2 control points, got {}",
                control.len()
            )));
        }

        let num_points = match *crit {
            LinearizationCriterion::NumPoints { count } => count,
            LinearizationCriterion::MaxError { max_num_points, .. } => {
                if max_num_points == 0 {
                    return Err(GeoError::PointCountUnderdetermined);
                }
                max_num_points
            }
        };
        if num_points < 2 {
            return Err(GeoError::InvalidPointCount(num_points));
        }

        let ascending = control[0].x() <= control[1].x();
        let ordered = control.windows(2).all(|w| {
            if ascending {
                w[0].x() <= w[1].x()
            } else {
                w[0].x() >= w[1].x()
            }
        });
        if !ordered {
            return Err(GeoError::UnorderedControlPoints);
        }

        let mut pts: Vec<Point2> = control.iter().map(Point::xy).collect();
        let (start_tan, end_tan) = if ascending {
            (slope(spline.vector_at_start), slope(spline.vector_at_end))
        } else {
            pts.reverse();
            (slope(-spline.vector_at_end), slope(-spline.vector_at_start))
        };

        let fit = SplineFit::solve(&pts, start_tan, end_tan)?;
        let mut samples: Vec<Point> = fit
            .sample(num_points)
            .into_iter()
            .map(|xy| control[0].sibling(xy, 0.0))
            .collect();
        if !ascending {
            samples.reverse();
        }

        // ends are the control points themselves, not recomputed values
        let last = samples.len() - 1;
        samples[0] = control[0].clone();
        samples[last] = control[control.len() - 1].clone();
        Ok(LineStringSegment::new(samples))
    }
}

/// End condition derived from a tangent vector.
fn slope(v: Vector2) -> f64 {
    v.y.atan2(v.x)
}

struct SplineFit {
    x: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl SplineFit {
    /// Fit through `pts`, which are sorted ascending on x.
    fn solve(pts: &[Point2], start_tan: f64, end_tan: f64) -> Result<Self> {
        let n = pts.len() - 1;
        let x: Vec<f64> = pts.iter().map(|p| p.x).collect();
        let y: Vec<f64> = pts.iter().map(|p| p.y).collect();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        if let Some(i) = h.iter().position(|&hi| hi == 0.0) {
            log::error!("Cubic spline control points {} and {} share the x abscissa {}", i, i + 1, x[i]);
            return Err(GeoError::SingularSystem(format!(
                "control points {} and {} share the x abscissa {}",
                i,
                i + 1,
                x[i]
            )));
        }

        let mut m = DMatrix::<f64>::zeros(n + 1, n + 1);
        m[(0, 0)] = 2.0 * h[0];
        m[(0, 1)] = h[0];
        for i in 1..n {
            m[(i, i - 1)] = h[i - 1];
            m[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            m[(i, i + 1)] = h[i];
        }
        m[(n, n - 1)] = h[n - 1];
        m[(n, n)] = 2.0 * h[n - 1];

        let mut rhs = DVector::<f64>::zeros(n + 1);
        rhs[0] = 3.0 * (y[1] - y[0]) / h[0] - 3.0 * start_tan;
        for i in 1..n {
            rhs[i] = 3.0 * (y[i + 1] - y[i]) / h[i] - 3.0 * (y[i] - y[i - 1]) / h[i - 1];
        }
        rhs[n] = 3.0 * end_tan - 3.0 * (y[n] - y[n - 1]) / h[n - 1];

        let c = m.lu().solve(&rhs).ok_or_else(|| {
            log::error!("Cubic spline system with {} unknowns is singular", n + 1);
            GeoError::SingularSystem(format!("cubic spline system with {} unknowns", n + 1))
        })?;
        let c: Vec<f64> = c.iter().copied().collect();

        let a = y;
        let b = (0..n)
            .map(|i| (a[i + 1] - a[i]) / h[i] - h[i] * (2.0 * c[i] + c[i + 1]) / 3.0)
            .collect();
        let d = (0..n).map(|i| (c[i + 1] - c[i]) / (3.0 * h[i])).collect();

        Ok(Self { x, a, b, c, d })
    }

    fn eval(&self, seg: usize, x: f64) -> f64 {
        let t = x - self.x[seg];
        self.a[seg] + self.b[seg] * t + self.c[seg] * t * t + self.d[seg] * t * t * t
    }

    /// `num_points` samples evenly spaced between the first and last abscissa.
    fn sample(&self, num_points: usize) -> Vec<Point2> {
        let n = self.x.len() - 1;
        let (x0, xn) = (self.x[0], self.x[n]);
        let spacing = (xn - x0) / (num_points - 1) as f64;

        let mut seg = 0;
        (0..num_points)
            .map(|i| {
                let x = if i == num_points - 1 {
                    xn
                } else {
                    x0 + i as f64 * spacing
                };
                while seg < n - 1 && x > self.x[seg + 1] {
                    seg += 1;
                }
                Point2::new(x, self.eval(seg, x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::CrsRef;
    use approx::assert_relative_eq;
    use gmlgeo_core::Tolerance;

    fn p(x: f64, y: f64) -> Point {
        Point::new_2d(x, y)
    }

    fn spline(points: Vec<Point>) -> CubicSpline {
        CubicSpline::new(points, Vector2::new(1.0, 1.0), Vector2::new(1.0, -1.0))
    }

    fn linearizer() -> Linearizer {
        Linearizer::new(Tolerance::default())
    }

    #[test]
    fn test_passes_through_control_points() {
        let control = vec![p(0.0, 0.0), p(1.0, 2.0), p(2.0, 1.0), p(3.0, 3.0), p(4.0, 0.0)];
        let s = spline(control.clone());
        let seg = linearizer()
            .linearize_cubic_spline(&s, &LinearizationCriterion::num_points(9))
            .unwrap();
        assert_eq!(seg.points.len(), 9);
        for (k, cp) in control.iter().enumerate() {
            let sample = &seg.points[2 * k];
            assert_relative_eq!(sample.x(), cp.x(), epsilon = 1e-9);
            assert_relative_eq!(sample.y(), cp.y(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_descending_keeps_direction() {
        let control = vec![p(4.0, 0.0), p(3.0, 3.0), p(2.0, 1.0), p(1.0, 2.0), p(0.0, 0.0)];
        let s = spline(control.clone());
        let seg = linearizer()
            .linearize_cubic_spline(&s, &LinearizationCriterion::num_points(9))
            .unwrap();
        assert_eq!(seg.points[0], control[0]);
        assert_eq!(seg.points[8], control[4]);
        assert_relative_eq!(seg.points[2].x(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(seg.points[2].y(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_samples_carry_crs() {
        let crs = CrsRef::new("EPSG:4258");
        let control: Vec<Point> = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]
            .iter()
            .map(|&(x, y)| p(x, y).with_crs(crs.clone()))
            .collect();
        let seg = linearizer()
            .linearize_cubic_spline(&spline(control), &LinearizationCriterion::num_points(7))
            .unwrap();
        assert!(seg.points.iter().all(|pt| pt.crs.as_ref() == Some(&crs)));
    }

    #[test]
    fn test_sparse_sampling_picks_right_piece() {
        // more pieces than samples: every sample must still use its own piece
        let control: Vec<Point> = (0..=8).map(|i| p(i as f64, (i % 2) as f64)).collect();
        let seg = linearizer()
            .linearize_cubic_spline(&spline(control), &LinearizationCriterion::num_points(3))
            .unwrap();
        assert_relative_eq!(seg.points[1].x(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(seg.points[1].y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unordered_control_points() {
        let s = spline(vec![p(0.0, 0.0), p(2.0, 1.0), p(1.0, 0.0)]);
        let err = linearizer()
            .linearize_cubic_spline(&s, &LinearizationCriterion::num_points(5))
            .unwrap_err();
        assert!(matches!(err, GeoError::UnorderedControlPoints));
    }

    #[test]
    fn test_rejects_3d() {
        let s = spline(vec![Point::new_3d(0.0, 0.0, 0.0), Point::new_3d(1.0, 1.0, 0.0)]);
        let err = linearizer()
            .linearize_cubic_spline(&s, &LinearizationCriterion::num_points(5))
            .unwrap_err();
        assert!(matches!(err, GeoError::UnsupportedDimension(3)));
    }

    #[test]
    fn test_max_error_needs_point_cap() {
        let s = spline(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)]);
        let l = linearizer();
        let err = l
            .linearize_cubic_spline(&s, &LinearizationCriterion::max_error(0.01, 0))
            .unwrap_err();
        assert!(matches!(err, GeoError::PointCountUnderdetermined));

        let seg = l
            .linearize_cubic_spline(&s, &LinearizationCriterion::max_error(0.01, 11))
            .unwrap();
        assert_eq!(seg.points.len(), 11);
    }

    #[test]
    fn test_duplicate_abscissa_is_singular() {
        let s = spline(vec![p(0.0, 0.0), p(1.0, 1.0), p(1.0, 2.0), p(2.0, 0.0)]);
        let err = linearizer()
            .linearize_cubic_spline(&s, &LinearizationCriterion::num_points(5))
            .unwrap_err();
        assert!(matches!(err, GeoError::SingularSystem(_)));
    }
}
