//! Points with their coordinate reference metadata.

use std::fmt;
use std::sync::Arc;

use gmlgeo_math::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Shared, opaque reference to a coordinate reference system (e.g. `EPSG:25832`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsRef(Arc<str>);

impl CrsRef {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CrsRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Precision model of the ordinates, carried through linearization untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PrecisionModel {
    #[default]
    Floating,
    FloatingSingle,
    Fixed { scale: f64 },
}

/// A 2D or 3D position.
///
/// For 2D points `coords.z` is zero and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coords: Point3,
    pub dim: usize,
    pub crs: Option<CrsRef>,
    pub precision: PrecisionModel,
}

impl Point {
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self {
            coords: Point3::new(x, y, 0.0),
            dim: 2,
            crs: None,
            precision: PrecisionModel::Floating,
        }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: Point3::new(x, y, z),
            dim: 3,
            crs: None,
            precision: PrecisionModel::Floating,
        }
    }

    pub fn with_crs(mut self, crs: CrsRef) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn with_precision(mut self, precision: PrecisionModel) -> Self {
        self.precision = precision;
        self
    }

    pub fn x(&self) -> f64 {
        self.coords.x
    }

    pub fn y(&self) -> f64 {
        self.coords.y
    }

    pub fn z(&self) -> Option<f64> {
        (self.dim > 2).then_some(self.coords.z)
    }

    pub fn xy(&self) -> Point2 {
        self.coords.truncate()
    }

    /// A new point at `xy` (and `z` for 3D points) sharing this point's
    /// dimension, CRS and precision model.
    pub fn sibling(&self, xy: Point2, z: f64) -> Self {
        let z = if self.dim > 2 { z } else { 0.0 };
        Self {
            coords: xy.extend(z),
            dim: self.dim,
            crs: self.crs.clone(),
            precision: self.precision,
        }
    }
}
