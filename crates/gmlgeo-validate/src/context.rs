//! Per-element state shared by the validators of one validation call.

use std::cell::OnceCell;

use gmlgeo_core::ElementId;
use gmlgeo_geometry::Geometry;

use crate::planar::PlanarConverter;

/// The element under validation together with its lazily computed planar form.
///
/// Not `Sync`: one context is built per element and validation call.
pub struct ElementContext<'a> {
    id: ElementId,
    geometry: &'a Geometry,
    converter: &'a dyn PlanarConverter,
    planar: OnceCell<Option<geo::Geometry<f64>>>,
}

impl<'a> ElementContext<'a> {
    pub fn new(id: ElementId, geometry: &'a Geometry, converter: &'a dyn PlanarConverter) -> Self {
        Self {
            id,
            geometry,
            converter,
            planar: OnceCell::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    pub fn converter(&self) -> &'a dyn PlanarConverter {
        self.converter
    }

    /// Planar form of the geometry, converted on first access.
    ///
    /// `None` when the geometry has no planar form; callers mark their
    /// result as failed silently.
    pub fn planar_geometry(&self) -> Option<&geo::Geometry<f64>> {
        self.planar
            .get_or_init(|| match self.converter.to_planar(self.geometry) {
                Ok(planar) => Some(planar),
                Err(err) => {
                    log::debug!("no planar geometry for element {}: {}", self.id, err);
                    None
                }
            })
            .as_ref()
    }
}
