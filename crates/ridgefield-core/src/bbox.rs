//! Bounding-box selection on named latitude/longitude coordinates.
//!
//! Bounds are open on both ends: a node is kept only when its coordinate
//! lies strictly between `lo` and `hi`. Rows or columns outside the box are
//! dropped from the result, never masked.

use crate::{CoordAxis, GridError, LatLonGrid};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Open interval `(lo, hi)` on one coordinate axis, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub lo: f64,
    pub hi: f64,
}

impl AxisBounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Bounds from the first and last element of a list.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        Some(Self::new(*values.first()?, *values.last()?))
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v > self.lo && v < self.hi
    }

    fn select(&self, axis: &CoordAxis) -> Vec<usize> {
        axis.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| self.contains(v))
            .map(|(k, _)| k)
            .collect()
    }
}

impl From<[f64; 2]> for AxisBounds {
    fn from(b: [f64; 2]) -> Self {
        Self::new(b[0], b[1])
    }
}

impl From<(f64, f64)> for AxisBounds {
    fn from(b: (f64, f64)) -> Self {
        Self::new(b.0, b.1)
    }
}

impl From<Range<f64>> for AxisBounds {
    fn from(r: Range<f64>) -> Self {
        Self::new(r.start, r.end)
    }
}

/// Crop `grid` to the open box `lat × lon`.
pub fn crop_to_bounds(
    grid: &LatLonGrid,
    lat: impl Into<AxisBounds>,
    lon: impl Into<AxisBounds>,
) -> LatLonGrid {
    let rows = lat.into().select(&grid.lat);
    let cols = lon.into().select(&grid.lon);
    log::debug!(
        "crop_to_bounds kept {}x{} of {}x{}",
        rows.len(),
        cols.len(),
        grid.rows(),
        grid.cols()
    );
    grid.select(&rows, &cols)
}

/// Crop by coordinate name.
///
/// `lat_name` and `lon_name` are looked up among the grid's two axes, so a
/// grid whose axes are called e.g. `lat`/`lon` or `y`/`x` can be cropped
/// without renaming. Fails when a name matches neither axis.
pub fn crop_to_bounds_named(
    grid: &LatLonGrid,
    lat_name: &str,
    lon_name: &str,
    lat: impl Into<AxisBounds>,
    lon: impl Into<AxisBounds>,
) -> Result<LatLonGrid, GridError> {
    let lat = lat.into();
    let lon = lon.into();

    let mut row_bounds = None;
    let mut col_bounds = None;
    for (name, bounds) in [(lat_name, lat), (lon_name, lon)] {
        if name == grid.lat.name {
            row_bounds = Some(bounds);
        } else if name == grid.lon.name {
            col_bounds = Some(bounds);
        } else {
            return Err(GridError::MissingAxis {
                name: name.to_string(),
                lat: grid.lat.name.clone(),
                lon: grid.lon.name.clone(),
            });
        }
    }

    let rows = match row_bounds {
        Some(b) => b.select(&grid.lat),
        None => (0..grid.rows()).collect(),
    };
    let cols = match col_bounds {
        Some(b) => b.select(&grid.lon),
        None => (0..grid.cols()).collect(),
    };
    Ok(grid.select(&rows, &cols))
}
