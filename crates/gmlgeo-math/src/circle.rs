//! Circle primitives for three points on an arc.
//!
//! All predicates work in a local frame centred on the three points (see
//! [`Shift::centering`]) so that projected coordinates with large absolute
//! values do not swamp the differences that matter.

use gmlgeo_core::{GeoError, Result};

use crate::{Point2, Shift};

/// Threshold on the triangle area below which three points count as collinear.
///
/// [`are_collinear`] is the only collinearity test; every caller goes through it
/// so the threshold stays consistent.
pub const EPSILON: f64 = 1e-6;

/// Signed area of the triangle `(p0, p1, p2)` (shoelace form).
///
/// Positive for counter-clockwise order, negative for clockwise.
pub fn signed_area(p0: Point2, p1: Point2, p2: Point2) -> f64 {
    0.5 * (p0.x * (p1.y - p2.y) + p1.x * (p2.y - p0.y) + p2.x * (p0.y - p1.y))
}

/// Whether the three points lie on a single line.
pub fn are_collinear(p0: Point2, p1: Point2, p2: Point2) -> bool {
    let shift = Shift::centering(&[p0, p1, p2]);
    let area = signed_area(shift.to_local(p0), shift.to_local(p1), shift.to_local(p2));
    area.abs() < EPSILON
}

/// Whether `p0 -> p1 -> p2` turns clockwise.
///
/// Fails with [`GeoError::CollinearPoints`] when no orientation exists.
pub fn is_clockwise(p0: Point2, p1: Point2, p2: Point2) -> Result<bool> {
    if are_collinear(p0, p1, p2) {
        return Err(GeoError::CollinearPoints);
    }
    Ok(signed_area(p0, p1, p2) < 0.0)
}

/// Center of the circle through three points (barycentric circumcenter formula).
pub fn circumcenter(p0: Point2, p1: Point2, p2: Point2) -> Result<Point2> {
    let shift = Shift::centering(&[p0, p1, p2]);
    let a = shift.to_local(p0);
    let b = shift.to_local(p1);
    let c = shift.to_local(p2);

    if are_collinear(a, b, c) {
        return Err(GeoError::CollinearPoints);
    }

    let ab = a - b;
    let ac = a - c;
    let bc = b - c;
    let ba = b - a;
    let ca = c - a;
    let cb = c - b;

    let cross = ab.perp_dot(bc);
    let denom = 2.0 * cross * cross;

    let wa = bc.length_squared() * ab.dot(ac) / denom;
    let wb = ac.length_squared() * ba.dot(bc) / denom;
    let wc = ab.length_squared() * ca.dot(cb) / denom;

    Ok(shift.to_world(a * wa + b * wb + c * wc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::dvec2;
    use proptest::prelude::*;

    #[test]
    fn test_unit_circle_center() {
        let c = circumcenter(dvec2(1.0, 0.0), dvec2(0.0, 1.0), dvec2(-1.0, 0.0)).unwrap();
        assert!(c.length() < 1e-12);
    }

    #[test]
    fn test_center_with_large_offsets() {
        let o = dvec2(3_500_000.0, 5_800_000.0);
        let c = circumcenter(o + dvec2(2.0, 0.0), o + dvec2(0.0, 2.0), o + dvec2(-2.0, 0.0)).unwrap();
        assert_relative_eq!(c.x, o.x, epsilon = 1e-6);
        assert_relative_eq!(c.y, o.y, epsilon = 1e-6);
    }

    #[test]
    fn test_orientation() {
        let a = dvec2(0.0, 0.0);
        let b = dvec2(1.0, 0.0);
        let c = dvec2(0.0, 1.0);
        assert!(!is_clockwise(a, b, c).unwrap());
        assert!(is_clockwise(a, c, b).unwrap());
    }

    #[test]
    fn test_collinear_is_degenerate() {
        let a = dvec2(0.0, 0.0);
        let b = dvec2(1.0, 1.0);
        let c = dvec2(2.0, 2.0);
        assert!(are_collinear(a, b, c));
        assert!(matches!(is_clockwise(a, b, c), Err(GeoError::CollinearPoints)));
        assert!(matches!(circumcenter(a, b, c), Err(GeoError::CollinearPoints)));
    }

    #[test]
    fn test_identical_points_are_collinear() {
        let p = dvec2(7.0, 7.0);
        assert!(are_collinear(p, p, p));
    }

    #[test]
    fn test_signed_area_matches_triangle() {
        let area = signed_area(dvec2(0.0, 0.0), dvec2(4.0, 0.0), dvec2(0.0, 3.0));
        assert_relative_eq!(area, 6.0);
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1000.0..1000.0f64
    }

    proptest! {
        #[test]
        fn prop_circumcenter_equidistant(
            x0 in coord(), y0 in coord(),
            x1 in coord(), y1 in coord(),
            x2 in coord(), y2 in coord(),
        ) {
            let (p0, p1, p2) = (dvec2(x0, y0), dvec2(x1, y1), dvec2(x2, y2));
            // well-shaped triangles only; slivers have huge radii
            let longest = p0.distance(p1).max(p1.distance(p2)).max(p2.distance(p0));
            prop_assume!(signed_area(p0, p1, p2).abs() > 0.01 * longest * longest);
            let c = circumcenter(p0, p1, p2).unwrap();
            let r0 = c.distance(p0);
            prop_assert!((c.distance(p1) - r0).abs() <= 1e-9 * r0.max(1.0));
            prop_assert!((c.distance(p2) - r0).abs() <= 1e-9 * r0.max(1.0));
        }

        #[test]
        fn prop_collinearity_is_order_independent(
            x0 in coord(), y0 in coord(),
            x1 in coord(), y1 in coord(),
            x2 in coord(), y2 in coord(),
        ) {
            let (p0, p1, p2) = (dvec2(x0, y0), dvec2(x1, y1), dvec2(x2, y2));
            let expected = are_collinear(p0, p1, p2);
            prop_assert_eq!(are_collinear(p1, p0, p2), expected);
            prop_assert_eq!(are_collinear(p2, p1, p0), expected);
            prop_assert_eq!(are_collinear(p1, p2, p0), expected);
        }

        #[test]
        fn prop_orientation_flips_with_order(
            x0 in coord(), y0 in coord(),
            x1 in coord(), y1 in coord(),
            x2 in coord(), y2 in coord(),
        ) {
            let (p0, p1, p2) = (dvec2(x0, y0), dvec2(x1, y1), dvec2(x2, y2));
            prop_assume!(!are_collinear(p0, p1, p2));
            prop_assert_ne!(is_clockwise(p0, p1, p2).unwrap(), is_clockwise(p0, p2, p1).unwrap());
        }
    }
}
