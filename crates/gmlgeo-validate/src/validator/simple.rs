//! Simplicity: the planar geometry must not touch or cross itself.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, CoordsIter, Line, LineString, Polygon};

use crate::context::ElementContext;
use crate::result::{keys, ValidationResult};

/// Outcome of a simplicity test, with the offending location when one is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Simplicity {
    Simple,
    NonSimple(Option<Coord<f64>>),
}

impl Simplicity {
    pub fn is_simple(&self) -> bool {
        matches!(self, Simplicity::Simple)
    }

    fn or_else(self, next: impl FnOnce() -> Simplicity) -> Simplicity {
        match self {
            Simplicity::Simple => next(),
            found => found,
        }
    }
}

pub fn validate(ctx: &ElementContext<'_>, result: &mut ValidationResult) {
    let Some(planar) = ctx.planar_geometry() else {
        result.fail_silently();
        return;
    };
    match check_simple(planar) {
        Simplicity::Simple => {}
        Simplicity::NonSimple(Some(at)) => {
            result.add_error_at(ctx.id(), keys::NOT_SIMPLE_INTERSECTION, at.into())
        }
        Simplicity::NonSimple(None) => result.add_error(ctx.id(), keys::NOT_SIMPLE),
    }
}

/// Self-intersection test on a planar geometry.
///
/// Reports the first offending location found. Segment pairs are compared
/// exhaustively, which is fine for the vertex counts of single features.
pub fn check_simple(geometry: &geo::Geometry<f64>) -> Simplicity {
    if !geometry
        .coords_iter()
        .all(|c| c.x.is_finite() && c.y.is_finite())
    {
        return Simplicity::NonSimple(None);
    }
    check_finite(geometry)
}

fn check_finite(geometry: &geo::Geometry<f64>) -> Simplicity {
    match geometry {
        geo::Geometry::Point(_)
        | geo::Geometry::Line(_)
        | geo::Geometry::Rect(_)
        | geo::Geometry::Triangle(_) => Simplicity::Simple,
        geo::Geometry::LineString(line) => line_string(line),
        geo::Geometry::Polygon(polygon) => polygon_rings(polygon),
        geo::Geometry::MultiPoint(points) => {
            let coords: Vec<Coord<f64>> = points.0.iter().map(|p| p.0).collect();
            match coords
                .iter()
                .enumerate()
                .find(|&(i, c)| coords[i + 1..].contains(c))
            {
                Some((_, c)) => Simplicity::NonSimple(Some(*c)),
                None => Simplicity::Simple,
            }
        }
        geo::Geometry::MultiLineString(lines) => multi_line_string(&lines.0),
        geo::Geometry::MultiPolygon(polygons) => polygons
            .0
            .iter()
            .fold(Simplicity::Simple, |acc, p| acc.or_else(|| polygon_rings(p))),
        geo::Geometry::GeometryCollection(members) => members
            .0
            .iter()
            .fold(Simplicity::Simple, |acc, g| acc.or_else(|| check_finite(g))),
    }
}

fn polygon_rings(polygon: &Polygon<f64>) -> Simplicity {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .fold(Simplicity::Simple, |acc, ring| acc.or_else(|| line_string(ring)))
}

/// Segments with consecutive repeated points removed.
fn segments(line: &LineString<f64>) -> Vec<Line<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(line.0.len());
    for c in &line.0 {
        if coords.last() != Some(c) {
            coords.push(*c);
        }
    }
    coords.windows(2).map(|w| Line::new(w[0], w[1])).collect()
}

/// Adjacent segments may meet only at their shared vertex, and the first and
/// last segment of a closed line only at the closing point.
fn line_string(line: &LineString<f64>) -> Simplicity {
    let segs = segments(line);
    let n = segs.len();
    let closed = n > 1 && segs[0].start == segs[n - 1].end;

    for i in 0..n {
        for j in i + 1..n {
            let adjacent = j == i + 1 || (closed && i == 0 && j == n - 1);
            match line_intersection(segs[i], segs[j]) {
                None => {}
                Some(LineIntersection::Collinear { intersection }) => {
                    return Simplicity::NonSimple(Some(intersection.start));
                }
                // non-collinear adjacent segments can only meet at the shared vertex
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    return Simplicity::NonSimple(Some(intersection));
                }
            }
        }
    }
    Simplicity::Simple
}

/// Members must be simple and may only meet at endpoints they both share.
fn multi_line_string(lines: &[LineString<f64>]) -> Simplicity {
    if let Some(found) = lines
        .iter()
        .map(line_string)
        .find(|s| !s.is_simple())
    {
        return found;
    }

    let boundary = |l: &LineString<f64>, c: Coord<f64>| {
        !l.is_closed() && (l.0.first() == Some(&c) || l.0.last() == Some(&c))
    };

    for (a_idx, a) in lines.iter().enumerate() {
        for b in &lines[a_idx + 1..] {
            for sa in segments(a) {
                for sb in segments(b) {
                    match line_intersection(sa, sb) {
                        None => {}
                        Some(LineIntersection::Collinear { intersection }) => {
                            return Simplicity::NonSimple(Some(intersection.start));
                        }
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            if !(boundary(a, intersection) && boundary(b, intersection)) {
                                return Simplicity::NonSimple(Some(intersection));
                            }
                        }
                    }
                }
            }
        }
    }
    Simplicity::Simple
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{coord, line_string, point, polygon, MultiLineString, MultiPoint};

    fn assert_non_simple_at(found: Simplicity, x: f64, y: f64) {
        let Simplicity::NonSimple(Some(at)) = found else {
            panic!("expected a located defect, got {found:?}");
        };
        assert_relative_eq!(at.x, x, epsilon = 1e-12);
        assert_relative_eq!(at.y, y, epsilon = 1e-12);
    }

    #[test]
    fn test_square_ring_is_simple() {
        let ring = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ];
        assert_eq!(check_simple(&ring.into()), Simplicity::Simple);
    }

    #[test]
    fn test_bowtie_crossing() {
        let bowtie = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ];
        assert_non_simple_at(check_simple(&bowtie.into()), 1.0, 1.0);
    }

    #[test]
    fn test_repeated_points_are_ignored() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 1.0),
        ];
        assert!(check_simple(&line.into()).is_simple());
    }

    #[test]
    fn test_backtracking_overlaps() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 1.0, y: 0.0)];
        assert!(matches!(
            check_simple(&line.into()),
            Simplicity::NonSimple(Some(_))
        ));
    }

    #[test]
    fn test_open_line_touching_its_start() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 1.0, y: 0.0),
        ];
        assert_non_simple_at(check_simple(&line.into()), 1.0, 0.0);
    }

    #[test]
    fn test_multipoint_duplicate() {
        let points = MultiPoint::new(vec![
            point!(x: 0.0, y: 0.0),
            point!(x: 3.0, y: 1.0),
            point!(x: 3.0, y: 1.0),
        ]);
        assert_eq!(
            check_simple(&points.into()),
            Simplicity::NonSimple(Some(coord! { x: 3.0, y: 1.0 }))
        );
    }

    #[test]
    fn test_multiline_shared_endpoint_is_simple() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
        ]);
        assert!(check_simple(&lines.into()).is_simple());
    }

    #[test]
    fn test_multiline_crossing() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)],
            line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)],
        ]);
        assert_non_simple_at(check_simple(&lines.into()), 1.0, 1.0);
    }

    #[test]
    fn test_non_finite_coordinates() {
        let line = line_string![(x: 0.0, y: 0.0), (x: f64::NAN, y: 1.0)];
        assert_eq!(check_simple(&line.into()), Simplicity::NonSimple(None));
    }
}
