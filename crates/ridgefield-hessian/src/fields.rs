//! Gradient and Hessian fields stacked along a component axis.
//!
//! Each field lives on a [`Lattice`], the window of the input grid where
//! every Hessian component is defined. Gradient values are sampled on the
//! same lattice so that points line up one-to-one.

use crate::derivatives::{backward, centered, Axis, Plane};
use crate::{DifferenceScheme, SpacingMetric};
use nalgebra::{Matrix2, Vector2};
use ridgefield_core::{CoordAxis, LatLonGrid};
use serde::{Deserialize, Serialize};

/// Components of the gradient vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientComponent {
    Dx,
    Dy,
}

impl GradientComponent {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Components of the 2×2 Hessian in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HessianComponent {
    Dxx,
    Dxy,
    Dydx,
    Dyy,
}

impl HessianComponent {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Rectangular window `[row0, row0 + rows) × [col0, col0 + cols)` of the input lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    pub row0: usize,
    pub col0: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Lattice {
    /// Common window of all planes.
    fn intersection(planes: &[&Plane]) -> Self {
        let row0 = planes.iter().map(|p| p.row0).max().unwrap_or(0);
        let col0 = planes.iter().map(|p| p.col0).max().unwrap_or(0);
        let row_end = planes.iter().map(|p| p.row_end()).min().unwrap_or(0);
        let col_end = planes.iter().map(|p| p.col_end()).min().unwrap_or(0);
        Self {
            row0,
            col0,
            rows: row_end.saturating_sub(row0),
            cols: col_end.saturating_sub(col0),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute `(row, col)` of the linear point index `k`.
    #[inline]
    pub fn position(&self, k: usize) -> (usize, usize) {
        (self.row0 + k / self.cols, self.col0 + k % self.cols)
    }

    /// Wrap per-point values into a grid carrying the source coordinates.
    pub fn to_grid(&self, source: &LatLonGrid, data: Vec<f64>) -> LatLonGrid {
        debug_assert_eq!(data.len(), self.len());
        let lat = &source.lat.values[self.row0..self.row0 + self.rows];
        let lon = &source.lon.values[self.col0..self.col0 + self.cols];
        LatLonGrid {
            lat: CoordAxis::new(source.lat.name.clone(), lat.to_vec()),
            lon: CoordAxis::new(source.lon.name.clone(), lon.to_vec()),
            data,
        }
    }
}

fn sample<const N: usize>(lattice: &Lattice, planes: [&Plane; N]) -> Vec<[f64; N]> {
    (0..lattice.len())
        .map(|k| {
            let (row, col) = lattice.position(k);
            planes.map(|p| p.at(row, col))
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    pub lattice: Lattice,
    pub values: Vec<[f64; 2]>,
}

impl GradientField {
    #[inline]
    pub fn vector(&self, k: usize) -> Vector2<f64> {
        let [dx, dy] = self.values[k];
        Vector2::new(dx, dy)
    }

    pub fn component(&self, c: GradientComponent) -> Vec<f64> {
        self.values.iter().map(|v| v[c.index()]).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HessianField {
    pub lattice: Lattice,
    pub values: Vec<[f64; 4]>,
}

impl HessianField {
    /// `[[dxx, dxy], [dydx, dyy]]` at point `k`.
    #[inline]
    pub fn matrix(&self, k: usize) -> Matrix2<f64> {
        let [dxx, dxy, dydx, dyy] = self.values[k];
        Matrix2::new(dxx, dxy, dydx, dyy)
    }

    pub fn component(&self, c: HessianComponent) -> Vec<f64> {
        self.values.iter().map(|v| v[c.index()]).collect()
    }
}

/// Gradient and Hessian of a field on a common lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivatives {
    pub gradient: GradientField,
    pub hessian: HessianField,
}

impl Derivatives {
    /// Differentiate `grid` (already smoothed) with the selected scheme.
    ///
    /// `dydx` is a copy of `dxy`; `dyy` is the latitude derivative of `dy`.
    pub fn compute(grid: &LatLonGrid, scheme: DifferenceScheme) -> Self {
        let metric = SpacingMetric::new(grid);
        let f = Plane::from_grid(grid);
        let lon = &grid.lon.values;
        let lat = &grid.lat.values;

        let d = |p: &Plane, axis: Axis| match scheme {
            DifferenceScheme::FirstOrder => backward(p, axis, &metric),
            DifferenceScheme::SecondOrder => {
                let coords = if axis == Axis::Lon { lon } else { lat };
                centered(p, axis, coords, &metric)
            }
        };

        let dx = d(&f, Axis::Lon);
        let dy = d(&f, Axis::Lat);
        let dxx = d(&dx, Axis::Lon);
        let dxy = d(&dx, Axis::Lat);
        let dyy = d(&dy, Axis::Lat);

        let lattice = Lattice::intersection(&[&dxx, &dxy, &dyy]);
        log::debug!(
            "{scheme} derivatives on {}x{} lattice at ({}, {})",
            lattice.rows,
            lattice.cols,
            lattice.row0,
            lattice.col0
        );

        Self {
            gradient: GradientField {
                lattice,
                values: sample(&lattice, [&dx, &dy]),
            },
            hessian: HessianField {
                lattice,
                values: sample(&lattice, [&dxx, &dxy, &dxy, &dyy]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ridgefield_core::EARTH_RADIUS_M;

    fn grid(rows: usize, cols: usize, f: impl FnMut(f64, f64) -> f64) -> LatLonGrid {
        LatLonGrid::from_fn(
            CoordAxis::linspace("latitude", -1.0, 0.5, rows),
            CoordAxis::linspace("longitude", 100.0, 0.5, cols),
            f,
        )
        .expect("grid")
    }

    #[test]
    fn lattice_shapes_per_scheme() {
        let g = grid(6, 7, |phi, lambda| phi * lambda);
        let first = Derivatives::compute(&g, DifferenceScheme::FirstOrder);
        assert_eq!(
            first.hessian.lattice,
            Lattice {
                row0: 2,
                col0: 2,
                rows: 4,
                cols: 5
            }
        );
        let second = Derivatives::compute(&g, DifferenceScheme::SecondOrder);
        assert_eq!(
            second.hessian.lattice,
            Lattice {
                row0: 1,
                col0: 1,
                rows: 5,
                cols: 6
            }
        );
        assert_eq!(second.gradient.values.len(), 30);
    }

    #[test]
    fn mixed_partials_are_copied() {
        let g = grid(5, 5, |phi, lambda| (phi * 0.3).sin() * (lambda * 0.2).cos());
        let d = Derivatives::compute(&g, DifferenceScheme::SecondOrder);
        assert_eq!(
            d.hessian.component(HessianComponent::Dxy),
            d.hessian.component(HessianComponent::Dydx)
        );
    }

    #[test]
    fn latitude_only_field_has_pure_dyy() {
        let g = grid(5, 4, |phi, _| phi * phi);
        let d = Derivatives::compute(&g, DifferenceScheme::FirstOrder);
        let step = 0.5_f64.to_radians() * EARTH_RADIUS_M;
        for k in 0..d.hessian.lattice.len() {
            let [dxx, dxy, _, dyy] = d.hessian.values[k];
            assert_eq!(dxx, 0.0);
            assert_eq!(dxy, 0.0);
            // second difference of φ² is 2·h² in degrees
            assert_relative_eq!(dyy, 2.0 * 0.25 / (step * step), max_relative = 1e-9);
        }
        assert!(d.gradient.component(GradientComponent::Dx).iter().all(|&v| v == 0.0));
    }
}
