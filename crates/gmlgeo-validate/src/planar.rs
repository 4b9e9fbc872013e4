//! Conversion of curved geometries into planar `geo` geometries.

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use gmlgeo_core::{GeoError, Result};
use gmlgeo_geometry::{
    CompositeKind, Curve, Geometry, LinearizationCriterion, Linearizer, Solid, Surface,
    SurfacePatch,
};

/// Converts curved geometries into planar ones usable for union and
/// intersection tests.
///
/// Geometries without a planar form fail with
/// [`GeoError::UnsupportedGeometryType`].
pub trait PlanarConverter: Send + Sync {
    fn to_planar(&self, geometry: &Geometry) -> Result<geo::Geometry<f64>>;

    fn patch_to_polygon(&self, patch: &SurfacePatch) -> Result<Polygon<f64>>;
}

/// Union of all patches of `surface`, each converted on its own.
pub fn union_of_patches(
    converter: &dyn PlanarConverter,
    surface: &Surface,
) -> Result<MultiPolygon<f64>> {
    let polygons = surface
        .patches
        .iter()
        .map(|patch| converter.patch_to_polygon(patch))
        .collect::<Result<Vec<_>>>()?;
    Ok(union_polygons(polygons))
}

/// Union of already converted polygons.
pub fn union_polygons(polygons: impl IntoIterator<Item = Polygon<f64>>) -> MultiPolygon<f64> {
    polygons
        .into_iter()
        .fold(MultiPolygon::new(Vec::new()), |union, polygon| {
            let polygon = MultiPolygon::new(vec![polygon]);
            if union.0.is_empty() {
                polygon
            } else {
                union.union(&polygon)
            }
        })
}

/// Planar converter that linearizes every curve with a fixed criterion.
#[derive(Debug, Clone)]
pub struct LinearizingConverter {
    linearizer: Linearizer,
    criterion: LinearizationCriterion,
}

impl LinearizingConverter {
    pub fn new(linearizer: Linearizer, criterion: LinearizationCriterion) -> Self {
        Self {
            linearizer,
            criterion,
        }
    }

    fn line_string(&self, curve: &Curve) -> Result<LineString<f64>> {
        let linear = self.linearizer.linearize(curve, &self.criterion)?;
        Ok(linear
            .points()
            .iter()
            .map(|p| Coord { x: p.x(), y: p.y() })
            .collect())
    }

    /// One patch gives a polygon, several a multi-polygon of the patches as
    /// they are. Joining them is [`union_of_patches`]'s job.
    fn surface(&self, surface: &Surface) -> Result<geo::Geometry<f64>> {
        let mut polygons = self.patches([surface])?;
        if polygons.len() == 1 {
            if let Some(polygon) = polygons.pop() {
                return Ok(geo::Geometry::Polygon(polygon));
            }
        }
        Ok(geo::Geometry::MultiPolygon(MultiPolygon::new(polygons)))
    }

    fn solid(&self, solid: &Solid) -> Result<geo::Geometry<f64>> {
        let shells = solid.exterior.iter().chain(&solid.interiors);
        Ok(geo::Geometry::MultiPolygon(MultiPolygon::new(
            self.patches(shells)?,
        )))
    }

    fn patches<'s>(
        &self,
        surfaces: impl IntoIterator<Item = &'s Surface>,
    ) -> Result<Vec<Polygon<f64>>> {
        surfaces
            .into_iter()
            .flat_map(|s| &s.patches)
            .map(|patch| self.patch_to_polygon(patch))
            .collect()
    }

    fn members(&self, members: &[Geometry]) -> Result<Vec<geo::Geometry<f64>>> {
        members.iter().map(|m| self.to_planar(m)).collect()
    }
}

impl PlanarConverter for LinearizingConverter {
    fn to_planar(&self, geometry: &Geometry) -> Result<geo::Geometry<f64>> {
        match geometry {
            Geometry::Point(p) => Ok(geo::Geometry::Point(geo::Point::new(p.x(), p.y()))),
            Geometry::Curve(c) => Ok(geo::Geometry::LineString(self.line_string(c)?)),
            Geometry::Surface(s) => self.surface(s),
            Geometry::Solid(s) => self.solid(s),
            Geometry::Multi(m) => Ok(collect_members(self.members(&m.members)?)),
            Geometry::Composite(c) => {
                let members = self.members(&c.members)?;
                if c.kind == CompositeKind::CompositeCurve {
                    if let Some(joined) = join_line_strings(&members) {
                        return Ok(geo::Geometry::LineString(joined));
                    }
                }
                Ok(collect_members(members))
            }
            Geometry::Unsupported(kind) => Err(GeoError::UnsupportedGeometryType(kind.clone())),
        }
    }

    fn patch_to_polygon(&self, patch: &SurfacePatch) -> Result<Polygon<f64>> {
        match patch {
            SurfacePatch::Polygon(p) => {
                let exterior = self.line_string(&p.exterior)?;
                let interiors = p
                    .interiors
                    .iter()
                    .map(|ring| self.line_string(ring))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Polygon::new(exterior, interiors))
            }
            SurfacePatch::Unsupported(kind) => {
                Err(GeoError::UnsupportedGeometryType(kind.clone()))
            }
        }
    }
}

/// Homogeneous members become the matching multi geometry, anything else a collection.
fn collect_members(members: Vec<geo::Geometry<f64>>) -> geo::Geometry<f64> {
    if members.iter().all(|g| matches!(g, geo::Geometry::Point(_))) && !members.is_empty() {
        let points = members
            .into_iter()
            .filter_map(|g| match g {
                geo::Geometry::Point(p) => Some(p),
                _ => None,
            })
            .collect();
        return geo::Geometry::MultiPoint(geo::MultiPoint::new(points));
    }
    if members.iter().all(|g| matches!(g, geo::Geometry::LineString(_))) && !members.is_empty() {
        let lines = members
            .into_iter()
            .filter_map(|g| match g {
                geo::Geometry::LineString(l) => Some(l),
                _ => None,
            })
            .collect();
        return geo::Geometry::MultiLineString(geo::MultiLineString::new(lines));
    }
    if members
        .iter()
        .all(|g| matches!(g, geo::Geometry::Polygon(_) | geo::Geometry::MultiPolygon(_)))
        && !members.is_empty()
    {
        let polygons = members
            .into_iter()
            .flat_map(|g| match g {
                geo::Geometry::Polygon(p) => vec![p],
                geo::Geometry::MultiPolygon(mp) => mp.0,
                _ => Vec::new(),
            })
            .collect();
        return geo::Geometry::MultiPolygon(MultiPolygon::new(polygons));
    }
    geo::Geometry::GeometryCollection(geo::GeometryCollection(members))
}

/// Member line strings joined end to end, if they all are line strings.
fn join_line_strings(members: &[geo::Geometry<f64>]) -> Option<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for member in members {
        let geo::Geometry::LineString(line) = member else {
            return None;
        };
        let skip = usize::from(coords.last().is_some() && coords.last() == line.0.first());
        coords.extend(line.0.iter().skip(skip).copied());
    }
    Some(LineString::new(coords))
}
