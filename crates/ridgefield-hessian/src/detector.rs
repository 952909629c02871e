//! Hessian ridge detection pipeline.
//!
//! Stages: axis orientation → optional Gaussian smoothing → spherical finite
//! differences → gradient/Hessian stacking on a common lattice → validity
//! mask → per-point 2×2 eigensolve and classification → reassembly on the
//! lattice in the caller's storage order.

use crate::classify::{classify_point, DegeneracyCounts, PointClass};
use crate::smoothing::gaussian_filter;
use crate::{Derivatives, PointSet, RidgeError, RidgeParams};
use log::{debug, info, warn};
use ridgefield_core::{AxisOrder, GridError, LatLonGrid};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Summary counts of a detection run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RidgeStats {
    /// Points on the output lattice.
    pub lattice_points: usize,
    /// Points with a finite Hessian.
    pub valid_points: usize,
    /// Points dropped because a Hessian component was non-finite.
    pub dropped_points: usize,
    /// Points marked as ridge.
    pub ridge_points: usize,
    pub degeneracies: DegeneracyCounts,
}

/// Output of [`RidgeDetector::detect`].
///
/// All three grids share the cropped lattice; dropped points are NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeDetection {
    /// 1 where the point is a ridge, 0 elsewhere.
    pub mask: LatLonGrid,
    /// Sign of the smallest Hessian eigenvalue: -1, 0 or +1.
    pub curvature_sign: LatLonGrid,
    /// Angle (radians) between the swapped dominant eigenvector and the gradient.
    pub angle: LatLonGrid,
    pub stats: RidgeStats,
}

/// Storage-order flips that bring both axes of a grid to ascending order.
///
/// Backward differences are labelled at the upper index, so the stencils
/// only agree with the physical orientation of the gradient when
/// coordinates increase with the index. Flipping is its own inverse: the
/// same value maps the outputs back to the input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Orientation {
    flip_lat: bool,
    flip_lon: bool,
}

impl Orientation {
    fn of(grid: &LatLonGrid) -> Result<Self, GridError> {
        Ok(Self {
            flip_lat: grid.lat.order()? == AxisOrder::Decreasing,
            flip_lon: grid.lon.order()? == AxisOrder::Decreasing,
        })
    }

    fn apply(self, grid: LatLonGrid) -> LatLonGrid {
        let grid = if self.flip_lat { grid.flip_lat() } else { grid };
        if self.flip_lon {
            grid.flip_lon()
        } else {
            grid
        }
    }
}

/// Ridge detector on latitude/longitude grids.
#[derive(Clone, Debug)]
pub struct RidgeDetector {
    params: RidgeParams,
}

impl RidgeDetector {
    pub fn new(params: RidgeParams) -> Result<Self, RidgeError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &RidgeParams {
        &self.params
    }

    /// Validate `grid`, bring both axes to ascending order and smooth it.
    fn prepare(&self, grid: &LatLonGrid) -> Result<(LatLonGrid, Orientation), RidgeError> {
        grid.validate(self.params.scheme.min_axis_len())?;
        let orientation = Orientation::of(grid)?;
        if orientation != Orientation::default() {
            debug!(
                "reordering axes to ascending (latitude flipped: {}, longitude flipped: {})",
                orientation.flip_lat, orientation.flip_lon
            );
        }
        let field = orientation.apply(grid.clone());

        let field = match self.params.sigma {
            Some(sigma) => {
                debug!(
                    "smoothing with sigma={sigma} truncate={} boundary={}",
                    self.params.truncate, self.params.boundary
                );
                gaussian_filter(&field, sigma, self.params.truncate, self.params.boundary)
            }
            None => field,
        };
        Ok((field, orientation))
    }

    /// Smooth (if configured) and differentiate `grid`.
    ///
    /// Derivatives are taken with both axes in ascending order, so lattice
    /// positions refer to the grid with any descending axis reversed.
    /// Fails when an axis is non-monotonic or shorter than the scheme needs.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, grid),
            fields(rows = grid.rows(), cols = grid.cols())
        )
    )]
    pub fn derivatives(&self, grid: &LatLonGrid) -> Result<Derivatives, RidgeError> {
        let (field, _) = self.prepare(grid)?;
        Ok(Derivatives::compute(&field, self.params.scheme))
    }

    /// Run the full pipeline.
    pub fn detect(&self, grid: &LatLonGrid) -> Result<RidgeDetection, RidgeError> {
        self.detect_with_progress(grid, |_, _| {})
    }

    /// Run the full pipeline, reporting `(done, total)` at coarse intervals
    /// while classifying points.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, grid, progress),
            fields(rows = grid.rows(), cols = grid.cols(), scheme = %self.params.scheme)
        )
    )]
    pub fn detect_with_progress(
        &self,
        grid: &LatLonGrid,
        progress: impl FnMut(usize, usize),
    ) -> Result<RidgeDetection, RidgeError> {
        let (field, orientation) = self.prepare(grid)?;
        let derivatives = Derivatives::compute(&field, self.params.scheme);
        let points = PointSet::from_hessian(&derivatives.hessian);
        info!(
            "{} of {} lattice points have a finite Hessian",
            points.len(),
            points.lattice_len()
        );

        let classes = classify_points(&derivatives, &points, progress);

        let threshold = self.params.angle_rad();
        let mut degeneracies = DegeneracyCounts::default();
        let mut angle = Vec::with_capacity(classes.len());
        let mut sign = Vec::with_capacity(classes.len());
        let mut mask = Vec::with_capacity(classes.len());
        for c in &classes {
            c.degeneracies().for_each(|d| degeneracies.record(d));
            angle.push(c.angle);
            sign.push(c.curvature_sign);
            mask.push(if c.is_ridge(threshold) { 1.0 } else { 0.0 });
        }
        let ridge_points = mask.iter().filter(|&&m| m == 1.0).count();

        if degeneracies.total() > 0 {
            warn!(
                "numeric degeneracies: {} complex eigenvalue pairs, {} clipped cosines, {} zero gradients",
                degeneracies.complex_eigenvalues,
                degeneracies.clipped_cosine,
                degeneracies.zero_gradient
            );
        }
        info!("{ridge_points} ridge points");

        let lattice = derivatives.hessian.lattice;
        let reassemble = |values: &[f64]| {
            orientation.apply(lattice.to_grid(&field, points.scatter(values)))
        };
        Ok(RidgeDetection {
            mask: reassemble(&mask),
            curvature_sign: reassemble(&sign),
            angle: reassemble(&angle),
            stats: RidgeStats {
                lattice_points: points.lattice_len(),
                valid_points: points.len(),
                dropped_points: points.dropped(),
                ridge_points,
                degeneracies,
            },
        })
    }
}

/// Detect ridges in `grid` with `params`.
pub fn find_ridges(grid: &LatLonGrid, params: &RidgeParams) -> Result<RidgeDetection, RidgeError> {
    RidgeDetector::new(params.clone())?.detect(grid)
}

#[cfg(not(feature = "rayon"))]
fn classify_points(
    derivatives: &Derivatives,
    points: &PointSet,
    mut progress: impl FnMut(usize, usize),
) -> Vec<PointClass> {
    let total = points.len();
    let step = (total / 10).max(1);
    let mut out = Vec::with_capacity(total);
    for (n, &k) in points.indices().iter().enumerate() {
        out.push(classify_point(
            &derivatives.hessian.matrix(k),
            &derivatives.gradient.vector(k),
        ));
        if (n + 1) % step == 0 || n + 1 == total {
            debug!(
                "classified {}/{} points ({:.0}%)",
                n + 1,
                total,
                100.0 * (n + 1) as f64 / total as f64
            );
            progress(n + 1, total);
        }
    }
    out
}

#[cfg(feature = "rayon")]
fn classify_points(
    derivatives: &Derivatives,
    points: &PointSet,
    mut progress: impl FnMut(usize, usize),
) -> Vec<PointClass> {
    use rayon::prelude::*;

    let out: Vec<PointClass> = points
        .indices()
        .par_iter()
        .map(|&k| {
            classify_point(
                &derivatives.hessian.matrix(k),
                &derivatives.gradient.vector(k),
            )
        })
        .collect();
    progress(out.len(), out.len());
    out
}
