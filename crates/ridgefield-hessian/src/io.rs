//! JSON configuration and report helpers for ridge detection runs.

use crate::{
    BoundaryMode, DifferenceScheme, RidgeDetection, RidgeDetector, RidgeError, RidgeParams,
    RidgeStats,
};
use ridgefield_core::{GridError, GridRecord, LatLonGrid};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum RidgeIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Ridge(#[from] RidgeError),
}

/// Load a grid stored as a [`GridRecord`] JSON file.
pub fn load_grid_json(path: impl AsRef<Path>) -> Result<LatLonGrid, RidgeIoError> {
    let raw = fs::read_to_string(path)?;
    let record: GridRecord = serde_json::from_str(&raw)?;
    Ok(LatLonGrid::try_from(record)?)
}

/// Write a grid as a pretty [`GridRecord`] JSON file.
pub fn write_grid_json(grid: &LatLonGrid, path: impl AsRef<Path>) -> Result<(), RidgeIoError> {
    let json = serde_json::to_string_pretty(&GridRecord::from(grid))?;
    fs::write(path, json)?;
    Ok(())
}

/// Configuration of a detection run read from disk.
///
/// Every parameter is optional; missing ones fall back to
/// [`RidgeParams::default`]. `no_smoothing = true` overrides `sigma`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RidgeDetectConfig {
    pub input_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub sigma: Option<f64>,
    #[serde(default)]
    pub no_smoothing: bool,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub angle_deg: Option<f64>,
    #[serde(default)]
    pub boundary: Option<String>,
    #[serde(default)]
    pub truncate: Option<f64>,
}

impl RidgeDetectConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RidgeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RidgeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("ridge_detect_report.json"))
    }

    /// Build detector parameters, applying overrides from the config.
    ///
    /// Scheme and boundary names are parsed here so that an unknown name
    /// fails before any data is read.
    pub fn build_params(&self) -> Result<RidgeParams, RidgeError> {
        let mut params = RidgeParams::default();
        if self.no_smoothing {
            params.sigma = None;
        } else if let Some(sigma) = self.sigma {
            params.sigma = Some(sigma);
        }
        if let Some(scheme) = self.scheme.as_deref() {
            params.scheme = scheme.parse::<DifferenceScheme>()?;
        }
        if let Some(angle) = self.angle_deg {
            params.angle_deg = angle;
        }
        if let Some(boundary) = self.boundary.as_deref() {
            params.boundary = boundary.parse::<BoundaryMode>()?;
        }
        if let Some(truncate) = self.truncate {
            params.truncate = truncate;
        }
        params.validate()?;
        Ok(params)
    }

    /// Build a detector from this config.
    pub fn build_detector(&self) -> Result<RidgeDetector, RidgeError> {
        RidgeDetector::new(self.build_params()?)
    }
}

/// Serializable outcome of a detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeDetectReport {
    pub input_path: String,
    pub params: RidgeParams,
    #[serde(default)]
    pub stats: Option<RidgeStats>,
    #[serde(default)]
    pub mask: Option<GridRecord>,
    #[serde(default)]
    pub curvature_sign: Option<GridRecord>,
    #[serde(default)]
    pub angle: Option<GridRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RidgeDetectReport {
    pub fn new(input_path: impl Into<String>, params: RidgeParams) -> Self {
        Self {
            input_path: input_path.into(),
            params,
            stats: None,
            mask: None,
            curvature_sign: None,
            angle: None,
            error: None,
        }
    }

    /// Populate report fields from a successful detection.
    pub fn set_detection(&mut self, res: &RidgeDetection) {
        self.stats = Some(res.stats.clone());
        self.mask = Some(GridRecord::from(&res.mask));
        self.curvature_sign = Some(GridRecord::from(&res.curvature_sign));
        self.angle = Some(GridRecord::from(&res.angle));
        self.error = None;
    }

    /// Record a detection error.
    pub fn set_error(&mut self, err: &RidgeError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RidgeIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RidgeIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
