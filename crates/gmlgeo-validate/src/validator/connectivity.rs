//! Polygon patch connectivity: the patches of a surface must form one piece.
//!
//! Solids are never inspected. Their shells are reported as not connected
//! without a message, so only surfaces produce diagnostics.

use gmlgeo_core::{GeoError, Result};
use gmlgeo_geometry::{Geometry, Surface};

use crate::context::ElementContext;
use crate::planar::{union_of_patches, union_polygons};
use crate::result::{keys, ValidationResult};

pub fn validate(ctx: &ElementContext<'_>, result: &mut ValidationResult) {
    if ctx.planar_geometry().is_none() {
        result.fail_silently();
        return;
    }
    if let Err(err) = check_connectivity(ctx, ctx.geometry(), result) {
        log::error!("connectivity of element {} not evaluated: {}", ctx.id(), err);
        result.fail_silently();
    }
}

/// How one member of a multi or composite geometry affects its parent.
enum Member {
    Connected,
    Disconnected,
    Unsupported(String),
}

/// Whether `geometry` is connected, appending a diagnostic for every
/// disconnected surface found on the way.
///
/// Recursion stops at the first disconnected member. Members whose kind has
/// no planar form count as connected and leave a warning.
///
/// Solids return `false` before any conversion, so a solid member with an
/// unsupported patch counts as disconnected; `validate` never gets there
/// because such a geometry has no planar form at the top level.
pub fn check_connectivity(
    ctx: &ElementContext<'_>,
    geometry: &Geometry,
    result: &mut ValidationResult,
) -> Result<bool> {
    match geometry {
        Geometry::Surface(surface) => surface_connected(ctx, surface, result),
        Geometry::Solid(_) => Ok(false),
        Geometry::Multi(_) if geometry.is_solid() => Ok(false),
        Geometry::Multi(multi) => members_connected(ctx, &multi.members, result),
        Geometry::Composite(composite) => members_connected(ctx, &composite.members, result),
        Geometry::Unsupported(kind) => Err(GeoError::UnsupportedGeometryType(kind.clone())),
        Geometry::Point(_) | Geometry::Curve(_) => Ok(true),
    }
}

fn surface_connected(
    ctx: &ElementContext<'_>,
    surface: &Surface,
    result: &mut ValidationResult,
) -> Result<bool> {
    if surface.patches.len() <= 1 {
        return Ok(true);
    }
    let union = match cached_patches(ctx, surface) {
        Some(patches) => union_polygons(patches.0.iter().cloned()),
        None => union_of_patches(ctx.converter(), surface)?,
    };
    if union.0.len() == 1 {
        Ok(true)
    } else {
        result.add_error(ctx.id(), keys::SURFACE_PATCHES_NOT_CONNECTED);
        Ok(false)
    }
}

/// The patches of the element's own surface, as already converted by the context.
fn cached_patches<'c>(
    ctx: &'c ElementContext<'_>,
    surface: &Surface,
) -> Option<&'c geo::MultiPolygon<f64>> {
    let is_element = matches!(ctx.geometry(), Geometry::Surface(s) if std::ptr::eq(s, surface));
    match ctx.planar_geometry() {
        Some(geo::Geometry::MultiPolygon(patches))
            if is_element && patches.0.len() == surface.patches.len() =>
        {
            Some(patches)
        }
        _ => None,
    }
}

fn members_connected(
    ctx: &ElementContext<'_>,
    members: &[Geometry],
    result: &mut ValidationResult,
) -> Result<bool> {
    for member in members {
        match classify(ctx, member, result)? {
            Member::Connected => {}
            Member::Disconnected => return Ok(false),
            Member::Unsupported(kind) => {
                log::warn!(
                    "element {}: member of unsupported type {} treated as connected",
                    ctx.id(),
                    kind
                );
                result.add_warning(ctx.id(), keys::UNSUPPORTED_MEMBER_IGNORED, &kind);
            }
        }
    }
    Ok(true)
}

fn classify(
    ctx: &ElementContext<'_>,
    member: &Geometry,
    result: &mut ValidationResult,
) -> Result<Member> {
    match check_connectivity(ctx, member, result) {
        Ok(true) => Ok(Member::Connected),
        Ok(false) => Ok(Member::Disconnected),
        Err(GeoError::UnsupportedGeometryType(kind)) => Ok(Member::Unsupported(kind)),
        Err(err) => Err(err),
    }
}
