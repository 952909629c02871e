//! File-to-file helpers used by the `ridgefield` CLI.

use crate::core::{crop_to_bounds, AxisBounds, GridError, LatLonGrid};
use crate::hessian::{
    load_grid_json, write_grid_json, RidgeDetectConfig, RidgeDetectReport, RidgeError,
    RidgeIoError,
};
use log::{info, warn};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the file-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum GridFileError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Ridge(#[from] RidgeError),
}

impl GridFileError {
    fn at(path: &Path, err: RidgeIoError) -> Self {
        match err {
            RidgeIoError::Io(source) => Self::Io {
                path: path.display().to_string(),
                source,
            },
            RidgeIoError::Json(e) => Self::Json(e),
            RidgeIoError::Grid(e) => Self::Grid(e),
            RidgeIoError::Ridge(e) => Self::Ridge(e),
        }
    }
}

/// Run one detection described by `cfg` and write its report.
///
/// Parameter and file errors are returned before anything is written. A
/// grid the detector rejects (non-monotonic or too short axes) still
/// produces a report with `error` set, and the error is returned too.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cfg), fields(input = %cfg.input_path))
)]
pub fn detect_grid_file(cfg: &RidgeDetectConfig) -> Result<RidgeDetectReport, GridFileError> {
    let detector = cfg.build_detector()?;
    let input = Path::new(&cfg.input_path);
    let grid = load_grid_json(input).map_err(|e| GridFileError::at(input, e))?;
    info!(
        "loaded {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        input.display()
    );

    let mut report = RidgeDetectReport::new(cfg.input_path.clone(), detector.params().clone());
    let outcome = detector.detect(&grid);
    match &outcome {
        Ok(detection) => report.set_detection(detection),
        Err(err) => {
            warn!("detection failed: {err}");
            report.set_error(err);
        }
    }

    let output = cfg.output_path();
    report
        .write_json(&output)
        .map_err(|e| GridFileError::at(&output, e))?;
    info!("report written to {}", output.display());

    outcome?;
    Ok(report)
}

/// Crop the grid in `input` to the open box `lat × lon` and write it to `output`.
pub fn crop_grid_file(
    input: impl AsRef<Path>,
    lat: impl Into<AxisBounds>,
    lon: impl Into<AxisBounds>,
    output: impl AsRef<Path>,
) -> Result<LatLonGrid, GridFileError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let grid = load_grid_json(input).map_err(|e| GridFileError::at(input, e))?;
    let cropped = crop_to_bounds(&grid, lat, lon);
    if cropped.is_empty() {
        warn!("crop of {} selected no grid points", input.display());
    }
    write_grid_json(&cropped, output).map_err(|e| GridFileError::at(output, e))?;
    Ok(cropped)
}
