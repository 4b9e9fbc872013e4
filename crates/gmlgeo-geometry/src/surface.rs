//! Surfaces, polygon patches and solids.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Surface,
    Polygon,
    PolyhedralSurface,
    CompositeSurface,
    OrientableSurface,
}

/// Planar patch bounded by an exterior ring and optional interior rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPatch {
    pub exterior: Curve,
    pub interiors: Vec<Curve>,
}

impl PolygonPatch {
    pub fn new(exterior: Curve, interiors: Vec<Curve>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfacePatch {
    Polygon(PolygonPatch),
    /// Patch kind without a planar form (e.g. `Cone`, `Sphere`).
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: Option<String>,
    pub kind: SurfaceKind,
    pub patches: Vec<SurfacePatch>,
}

impl Surface {
    pub fn new(kind: SurfaceKind, patches: Vec<SurfacePatch>) -> Self {
        Self {
            id: None,
            kind,
            patches,
        }
    }

    /// A `gml:Polygon`: one polygon patch.
    pub fn polygon(patch: PolygonPatch) -> Self {
        Self::new(SurfaceKind::Polygon, vec![SurfacePatch::Polygon(patch)])
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    Solid,
    CompositeSolid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub id: Option<String>,
    pub kind: SolidKind,
    pub exterior: Option<Surface>,
    pub interiors: Vec<Surface>,
}

impl Solid {
    pub fn new(exterior: Surface) -> Self {
        Self {
            id: None,
            kind: SolidKind::Solid,
            exterior: Some(exterior),
            interiors: Vec::new(),
        }
    }
}
