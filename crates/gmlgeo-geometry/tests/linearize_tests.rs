use approx::assert_relative_eq;
use gmlgeo_core::Tolerance;
use gmlgeo_geometry::{
    ArcSegment, ArcString, Curve, CurveSegment, LinearizationCriterion, Linearizer, Point,
};
use gmlgeo_math::circumcenter;
use proptest::prelude::*;

fn on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> Point {
    Point::new_2d(cx + r * angle.cos(), cy + r * angle.sin())
}

/// Three distinct angles in increasing order, at least 0.2 rad apart.
fn arc_angles() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0..6.0f64, 0.2..2.5f64, 0.2..2.5f64).prop_map(|(a, d1, d2)| (a, a + d1, a + d1 + d2))
}

proptest! {
    #[test]
    fn prop_num_points_is_exact(
        (a0, a1, a2) in arc_angles(),
        r in 1.0..500.0f64,
        n in 2usize..200,
    ) {
        let p0 = on_circle(10.0, -4.0, r, a0);
        let p2 = on_circle(10.0, -4.0, r, a2);
        let p1 = on_circle(10.0, -4.0, r, a1);
        let arc = ArcSegment::new(p0.clone(), p1, p2.clone());
        let out = Linearizer::default()
            .linearize_arc(&arc, false, &LinearizationCriterion::num_points(n))
            .unwrap();
        prop_assert_eq!(out.points.len(), n);
        prop_assert_eq!(out.points[0].xy(), p0.xy());
        prop_assert_eq!(out.points[n - 1].xy(), p2.xy());
    }

    #[test]
    fn prop_max_error_bounds_chord_deviation(
        (a0, a1, a2) in arc_angles(),
        r in 1.0..100.0f64,
        max_error in 1e-3..1e-1f64,
    ) {
        let [p0, p1, p2] = [a0, a1, a2].map(|a| on_circle(0.0, 0.0, r, a));
        let tolerance = Tolerance::default();
        let arc = ArcSegment::new(p0.clone(), p1.clone(), p2.clone());
        let out = Linearizer::new(tolerance)
            .linearize_arc(&arc, false, &LinearizationCriterion::max_error(max_error, 0))
            .unwrap();

        let center = circumcenter(p0.xy(), p1.xy(), p2.xy()).unwrap();
        for chord in out.points.windows(2) {
            let mid = (chord[0].xy() + chord[1].xy()) * 0.5;
            let deviation = r - mid.distance(center);
            prop_assert!(deviation <= max_error + tolerance.linear + 1e-9);
        }
    }
}

#[test]
fn test_curve_of_mixed_segments() {
    let p = Point::new_2d;
    let curve = Curve::from_segments(vec![
        CurveSegment::Arc(ArcSegment::new(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0))),
        CurveSegment::ArcString(ArcString::new(vec![
            p(2.0, 0.0),
            p(3.0, -1.0),
            p(4.0, 0.0),
            p(5.0, 1.0),
            p(6.0, 0.0),
        ])),
    ]);
    let linear = Linearizer::default()
        .linearize(&curve, &LinearizationCriterion::num_points(7))
        .unwrap();
    assert!(linear.is_linear());

    let points = linear.points();
    // 7 for the arc, then 6 new points for each of the two string arcs
    assert_eq!(points.len(), 19);
    assert_relative_eq!(points[0].x(), 0.0);
    assert_relative_eq!(points[18].x(), 6.0);
    assert_relative_eq!(points[6].x(), 2.0);
}
