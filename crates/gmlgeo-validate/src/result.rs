//! Diagnostics collected while validating one element.

use gmlgeo_core::ElementId;
use serde::{Deserialize, Serialize};

use crate::format::problem_location;

/// Message keys reported by the validators.
pub mod keys {
    pub const NOT_SIMPLE: &str = "gmlgeox.validation.geometry.not.simple";
    pub const NOT_SIMPLE_INTERSECTION: &str = "gmlgeox.validation.geometry.not.simple.intersection";
    pub const SURFACE_PATCHES_NOT_CONNECTED: &str =
        "gmlgeox.validation.geometry.surfacepatchesnotconnected";
    pub const UNSUPPORTED_MEMBER_IGNORED: &str =
        "gmlgeox.validation.geometry.unsupportedgeometrytype.ignored";
}

/// Default English rendering of a message key.
pub fn default_text(key: &str) -> &'static str {
    match key {
        keys::NOT_SIMPLE => "The geometry is not simple.",
        keys::NOT_SIMPLE_INTERSECTION => "The geometry is not simple: it intersects itself.",
        keys::SURFACE_PATCHES_NOT_CONNECTED => "The patches of the surface are not connected.",
        keys::UNSUPPORTED_MEMBER_IGNORED => {
            "A member of unsupported geometry type was ignored by the connectivity check"
        }
        _ => "Unknown validation message.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A location in the planar geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub element_id: ElementId,
    pub key: String,
    pub text: String,
    pub coordinate: Option<Coordinate>,
    pub severity: Severity,
}

/// Append-only sink for the diagnostics of one validation call.
///
/// `fail_silently` records that a check could not be evaluated at all,
/// which is not the same as the element being invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
    failed_silently: bool,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, element_id: ElementId, key: &str) {
        self.push(element_id, key, default_text(key).to_string(), None, Severity::Error);
    }

    /// Error with the offending location appended to the message text.
    pub fn add_error_at(&mut self, element_id: ElementId, key: &str, coordinate: Coordinate) {
        let text = format!("{} {}", default_text(key), problem_location(&coordinate));
        self.push(element_id, key, text, Some(coordinate), Severity::Error);
    }

    pub fn add_warning(&mut self, element_id: ElementId, key: &str, detail: &str) {
        let text = format!("{}: {}", default_text(key), detail);
        self.push(element_id, key, text, None, Severity::Warning);
    }

    fn push(
        &mut self,
        element_id: ElementId,
        key: &str,
        text: String,
        coordinate: Option<Coordinate>,
        severity: Severity,
    ) {
        self.diagnostics.push(Diagnostic {
            element_id,
            key: key.to_string(),
            text,
            coordinate,
            severity,
        });
    }

    pub fn fail_silently(&mut self) {
        self.failed_silently = true;
    }

    pub fn is_failed_silently(&self) -> bool {
        self.failed_silently
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Evaluated and free of errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        !self.failed_silently && self.errors().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn test_fail_silently_is_not_an_error() {
        let mut result = ValidationResult::new();
        result.fail_silently();
        assert!(result.is_failed_silently());
        assert!(!result.is_valid());
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn test_warning_keeps_result_valid() {
        let mut result = ValidationResult::new();
        result.add_warning(ElementId::from_raw(1), keys::UNSUPPORTED_MEMBER_IGNORED, "Tin");
        assert!(result.is_valid());
        assert_eq!(result.warnings().count(), 1);
        assert!(result.diagnostics()[0].text.ends_with(": Tin"));
    }

    #[test]
    fn test_error_order_and_location() {
        let mut result = ValidationResult::new();
        let id = ElementId::from_raw(7);
        result.add_error(id, keys::NOT_SIMPLE);
        result.add_error_at(id, keys::NOT_SIMPLE_INTERSECTION, Coordinate::new(1.0, 2.5));

        let d = result.diagnostics();
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].key, keys::NOT_SIMPLE);
        assert_eq!(d[0].coordinate, None);
        assert_eq!(d[1].coordinate, Some(Coordinate::new(1.0, 2.5)));
        assert!(d[1].text.ends_with("Problem location: 1.000 2.500"));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_json_report() {
        let mut result = ValidationResult::new();
        result.add_error(ElementId::from_raw(3), keys::SURFACE_PATCHES_NOT_CONNECTED);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["diagnostics"][0]["key"], keys::SURFACE_PATCHES_NOT_CONNECTED);
        assert_eq!(json["diagnostics"][0]["severity"], "Error");
        assert_eq!(json["failed_silently"], false);

        let back: ValidationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
