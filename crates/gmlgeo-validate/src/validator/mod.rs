//! The fixed set of validators and the pipeline running them.

pub mod connectivity;
pub mod simple;

use gmlgeo_core::{ElementId, GeoError, Result, SrsLookup, Tolerance};
use gmlgeo_geometry::{Geometry, LinearizationCriterion, Linearizer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::ElementContext;
use crate::planar::{LinearizingConverter, PlanarConverter};
use crate::result::ValidationResult;

/// A geometry validator, identified by a stable numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validator {
    PolygonPatchConnectivity,
    Simplicity,
}

impl Validator {
    pub const ALL: [Validator; 2] = [Validator::PolygonPatchConnectivity, Validator::Simplicity];

    pub fn id(self) -> u32 {
        match self {
            Validator::PolygonPatchConnectivity => 1,
            Validator::Simplicity => 3,
        }
    }

    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or(GeoError::UnknownValidator(id))
    }

    pub fn validate(self, ctx: &ElementContext<'_>, result: &mut ValidationResult) {
        match self {
            Validator::PolygonPatchConnectivity => connectivity::validate(ctx, result),
            Validator::Simplicity => simple::validate(ctx, result),
        }
    }
}

/// Which validators run, in which order, and how curves are linearized for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub validators: Vec<u32>,
    pub tolerance: Tolerance,
    pub criterion: LinearizationCriterion,
    pub standard_srs: Option<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validators: Validator::ALL.iter().map(|v| v.id()).collect(),
            tolerance: Tolerance::default(),
            criterion: LinearizationCriterion::max_error(1e-5, 1000),
            standard_srs: None,
        }
    }
}

/// Runs the configured validators over features.
pub struct ValidationPipeline {
    validators: Vec<Validator>,
    converter: Box<dyn PlanarConverter>,
    srs: SrsLookup,
}

impl ValidationPipeline {
    /// Fails with [`GeoError::UnknownValidator`] for ids outside the known set.
    pub fn from_config(config: &ValidationConfig) -> Result<Self> {
        let validators = config
            .validators
            .iter()
            .map(|&id| Validator::from_id(id))
            .collect::<Result<Vec<_>>>()?;
        let converter =
            LinearizingConverter::new(Linearizer::new(config.tolerance), config.criterion);
        Ok(Self {
            validators,
            converter: Box::new(converter),
            srs: SrsLookup::new(config.standard_srs.clone()),
        })
    }

    /// Replace the planar converter, e.g. with one backed by a cache.
    pub fn with_converter(mut self, converter: Box<dyn PlanarConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn srs_lookup(&self) -> &SrsLookup {
        &self.srs
    }

    pub fn validate(&self, id: ElementId, geometry: &Geometry) -> ValidationResult {
        let ctx = ElementContext::new(id, geometry, self.converter.as_ref());
        let mut result = ValidationResult::new();
        for validator in &self.validators {
            validator.validate(&ctx, &mut result);
        }
        log::debug!(
            "element {}: {} diagnostics, failed silently: {}",
            id,
            result.diagnostics().len(),
            result.is_failed_silently()
        );
        result
    }

    /// Validate features in parallel. Results keep the input order.
    pub fn validate_all(&self, features: &[(ElementId, Geometry)]) -> Vec<ValidationResult> {
        features
            .par_iter()
            .map(|(id, geometry)| self.validate(*id, geometry))
            .collect()
    }
}
