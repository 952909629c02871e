//! Hessian ridge detector for scalar fields on latitude/longitude grids.
//!
//! ## Quickstart
//!
//! ```
//! use ridgefield_core::{CoordAxis, LatLonGrid};
//! use ridgefield_hessian::{RidgeDetector, RidgeParams};
//!
//! let grid = LatLonGrid::from_fn(
//!     CoordAxis::linspace("latitude", -5.0, 1.0, 11),
//!     CoordAxis::linspace("longitude", 0.0, 1.0, 21),
//!     |_, lon| (-(lon - 10.0).powi(2) / 2.0).exp(),
//! )?;
//! let detector = RidgeDetector::new(RidgeParams::unsmoothed())?;
//! let ridges = detector.detect(&grid)?;
//! println!("{} ridge points", ridges.stats.ridge_points);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Algorithm:
//! 0. Reverse any descending axis; outputs are reversed back at the end,
//!    so they follow the caller's storage order.
//! 1. Optionally smooth the field with an index-space Gaussian.
//! 2. Convert grid steps to metres: `dx = Δλ·R·cos φ`, `dy = Δφ·R`.
//! 3. Differentiate twice (backward or centered stencil) to get the
//!    gradient `(dx, dy)` and the Hessian `(dxx, dxy, dydx = dxy, dyy)`.
//! 4. Drop every lattice point with a non-finite Hessian component.
//! 5. Per point, pick the eigenvector of the largest-signed eigenvalue,
//!    swap its components and measure its angle to the gradient.
//! 6. Mark a ridge where that angle is within the threshold and the
//!    smallest eigenvalue is negative.
//!
//! The eigenvector is selected by signed `argmax`, not by magnitude, and
//! eigenvectors are sign-normalised (largest component non-negative), so
//! only gradients pointing along the positive swapped direction pass the
//! angle test. Both choices are part of the output contract.

mod classify;
mod derivatives;
mod detector;
mod eigen;
mod error;
mod fields;
mod io;
mod metric;
mod params;
mod points;
mod smoothing;

pub use classify::{classify_point, DegeneracyCounts, NumericDegeneracy, PointClass};
pub use derivatives::{centered_gradient, Axis, Plane};
pub use detector::{find_ridges, RidgeDetection, RidgeDetector, RidgeStats};
pub use eigen::Eigen2;
pub use error::RidgeError;
pub use fields::{
    Derivatives, GradientComponent, GradientField, HessianComponent, HessianField, Lattice,
};
pub use io::{load_grid_json, write_grid_json, RidgeDetectConfig, RidgeDetectReport, RidgeIoError};
pub use metric::SpacingMetric;
pub use params::{BoundaryMode, DifferenceScheme, RidgeParams};
pub use points::PointSet;
pub use smoothing::{gaussian_filter, gaussian_kernel};
