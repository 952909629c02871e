//! High-level facade crate for the `ridgefield-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the grid types and the Hessian ridge detector
//! - file-level helpers that read a JSON grid, run detection or cropping,
//!   and write the result back to disk
//! - (feature `cli`) the `ridgefield` command-line tool
//!
//! ## Quickstart
//!
//! ```
//! use ridgefield::core::{CoordAxis, LatLonGrid};
//! use ridgefield::{find_ridges, RidgeParams};
//!
//! let grid = LatLonGrid::from_fn(
//!     CoordAxis::linspace("latitude", 60.0, -0.5, 41),
//!     CoordAxis::linspace("longitude", -20.0, 0.5, 61),
//!     |lat, lon| (-(lat - 50.0 - 0.1 * lon).powi(2) / 4.0).exp(),
//! )?;
//! let ridges = find_ridges(&grid, &RidgeParams::default())?;
//! assert_eq!(ridges.mask.shape(), (39, 59));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## API map
//! - `ridgefield::core`: coordinate axes, `LatLonGrid`, JSON grid records,
//!   bounding-box cropping, logger setup.
//! - `ridgefield::hessian`: smoothing, spherical finite differences, the
//!   per-point eigen classification and the JSON config/report types.
//! - `ridgefield::pipeline`: file-to-file detection and cropping.

pub use ridgefield_core as core;
pub use ridgefield_hessian as hessian;

pub use ridgefield_core::{crop_to_bounds, AxisBounds, CoordAxis, GridError, LatLonGrid};
pub use ridgefield_hessian::{
    find_ridges, BoundaryMode, DifferenceScheme, RidgeDetection, RidgeDetector, RidgeError,
    RidgeParams, RidgeStats,
};

pub mod pipeline;

pub use pipeline::{crop_grid_file, detect_grid_file, GridFileError};
