//! Axis-aligned finite differences on sub-lattices of the input grid.
//!
//! A [`Plane`] is a rectangular window of the input lattice that keeps
//! track of where it starts (`row0`, `col0`). Every derivative returns a new
//! plane; planes shrink at the low end of an axis whenever a physical
//! spacing is undefined there.

use crate::SpacingMetric;
use ridgefield_core::LatLonGrid;

/// Axis along which a derivative is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Longitude, physical `x`.
    Lon,
    /// Latitude, physical `y`.
    Lat,
}

/// Row-major window `[row0, row0 + rows) × [col0, col0 + cols)` of the input lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    pub row0: usize,
    pub col0: usize,
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Plane {
    pub fn from_grid(grid: &LatLonGrid) -> Self {
        Self {
            row0: 0,
            col0: 0,
            rows: grid.rows(),
            cols: grid.cols(),
            data: grid.data.clone(),
        }
    }

    #[inline]
    fn local(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    /// Value at the absolute lattice position `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.local(row - self.row0, col - self.col0)
    }

    pub fn row_end(&self) -> usize {
        self.row0 + self.rows
    }

    pub fn col_end(&self) -> usize {
        self.col0 + self.cols
    }
}

/// Backward difference divided by the physical spacing:
/// `(f[i] - f[i-1]) / Δ(i)`, labelled at `i`.
pub fn backward(plane: &Plane, axis: Axis, metric: &SpacingMetric) -> Plane {
    match axis {
        Axis::Lon => {
            let cols = plane.cols.saturating_sub(1);
            let mut data = Vec::with_capacity(plane.rows * cols);
            for r in 0..plane.rows {
                let row = plane.row0 + r;
                for c in 1..plane.cols {
                    let col = plane.col0 + c;
                    let diff = plane.local(r, c) - plane.local(r, c - 1);
                    data.push(diff / metric.dx(row, col));
                }
            }
            Plane {
                row0: plane.row0,
                col0: plane.col0 + 1,
                rows: plane.rows,
                cols,
                data,
            }
        }
        Axis::Lat => {
            let rows = plane.rows.saturating_sub(1);
            let mut data = Vec::with_capacity(rows * plane.cols);
            for r in 1..plane.rows {
                let dy = metric.dy(plane.row0 + r);
                for c in 0..plane.cols {
                    let diff = plane.local(r, c) - plane.local(r - 1, c);
                    data.push(diff / dy);
                }
            }
            Plane {
                row0: plane.row0 + 1,
                col0: plane.col0,
                rows,
                cols: plane.cols,
                data,
            }
        }
    }
}

/// Derivative of `values` with respect to `coords`: second-order accurate
/// in the interior (non-uniform spacing allowed), first-order one-sided at
/// both ends. Fewer than two samples yield NaN.
pub fn centered_gradient(values: &[f64], coords: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![f64::NAN; n];
    }
    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / (coords[1] - coords[0]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]);
    for i in 1..n - 1 {
        let hs = coords[i] - coords[i - 1];
        let hd = coords[i + 1] - coords[i];
        let a = -hd / (hs * (hd + hs));
        let b = (hd - hs) / (hd * hs);
        let c = hs / (hd * (hd + hs));
        out[i] = a * values[i - 1] + b * values[i] + c * values[i + 1];
    }
    out
}

/// Centered derivative rescaled to a raw two-step difference and divided by
/// the physical spacing: `∂f/∂c · 2·(c1 - c0) / Δ(i)`.
///
/// `coords` is the full coordinate vector of the differentiated axis, in
/// degrees. The spacing is undefined at absolute index 0, so a plane that
/// starts there loses its first row/column.
pub fn centered(plane: &Plane, axis: Axis, coords: &[f64], metric: &SpacingMetric) -> Plane {
    match axis {
        Axis::Lon => {
            let skip = usize::from(plane.col0 == 0);
            let cols = plane.cols.saturating_sub(skip);
            let scaling = metric.lon_scaling();
            let axis_coords = &coords[plane.col0..plane.col_end()];
            let mut data = Vec::with_capacity(plane.rows * cols);
            for r in 0..plane.rows {
                let row = plane.row0 + r;
                let line = &plane.data[r * plane.cols..(r + 1) * plane.cols];
                let grad = centered_gradient(line, axis_coords);
                for (c, g) in grad.iter().enumerate().skip(skip) {
                    data.push(scaling * g / metric.dx(row, plane.col0 + c));
                }
            }
            Plane {
                row0: plane.row0,
                col0: plane.col0 + skip,
                rows: plane.rows,
                cols,
                data,
            }
        }
        Axis::Lat => {
            let skip = usize::from(plane.row0 == 0);
            let rows = plane.rows.saturating_sub(skip);
            let scaling = metric.lat_scaling();
            let axis_coords = &coords[plane.row0..plane.row_end()];
            let mut columns = Vec::with_capacity(plane.cols);
            for c in 0..plane.cols {
                let line: Vec<f64> = (0..plane.rows).map(|r| plane.local(r, c)).collect();
                columns.push(centered_gradient(&line, axis_coords));
            }
            let mut data = Vec::with_capacity(rows * plane.cols);
            for r in skip..plane.rows {
                let dy = metric.dy(plane.row0 + r);
                for col in &columns {
                    data.push(scaling * col[r] / dy);
                }
            }
            Plane {
                row0: plane.row0 + skip,
                col0: plane.col0,
                rows,
                cols: plane.cols,
                data,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ridgefield_core::{CoordAxis, EARTH_RADIUS_M};

    fn deg_m() -> f64 {
        EARTH_RADIUS_M * std::f64::consts::PI / 180.0
    }

    fn equator_grid(rows: usize, cols: usize, f: impl FnMut(f64, f64) -> f64) -> LatLonGrid {
        LatLonGrid::from_fn(
            CoordAxis::linspace("latitude", 0.0, 1.0, rows),
            CoordAxis::linspace("longitude", 0.0, 1.0, cols),
            f,
        )
        .expect("grid")
    }

    #[test]
    fn backward_shrinks_and_labels_upper() {
        let g = equator_grid(3, 4, |_, lambda| lambda * lambda);
        let m = SpacingMetric::new(&g);
        let p = backward(&Plane::from_grid(&g), Axis::Lon, &m);
        assert_eq!((p.row0, p.col0, p.rows, p.cols), (0, 1, 3, 3));
        // f(2) - f(1) = 3 over one degree at the equator
        assert_relative_eq!(p.at(0, 2), 3.0 / deg_m(), max_relative = 1e-12);

        let q = backward(&Plane::from_grid(&g), Axis::Lat, &m);
        assert_eq!((q.row0, q.col0, q.rows, q.cols), (1, 0, 2, 4));
        assert!(q.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn centered_gradient_matches_quadratic_on_uneven_coords() {
        let coords = [0.0, 1.0, 3.0, 4.0];
        let values: Vec<f64> = coords.iter().map(|x| x * x).collect();
        let g = centered_gradient(&values, &coords);
        // exact in the interior for quadratics, one-sided at the ends
        assert_relative_eq!(g[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(g[2], 6.0, epsilon = 1e-12);
        assert_relative_eq!(g[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(g[3], 7.0, epsilon = 1e-12);
        assert!(centered_gradient(&[1.0], &[0.0])[0].is_nan());
    }

    #[test]
    fn centered_drops_only_the_first_index() {
        let g = equator_grid(3, 5, |_, lambda| 2.0 * lambda);
        let m = SpacingMetric::new(&g);
        let p = centered(&Plane::from_grid(&g), Axis::Lon, &g.lon.values, &m);
        assert_eq!((p.row0, p.col0, p.rows, p.cols), (0, 1, 3, 4));
        // raw two-step difference 4 over one degree, at every column incl. the edge
        for col in 1..5 {
            assert_relative_eq!(p.at(0, col), 4.0 / deg_m(), max_relative = 1e-9);
        }
        let cos1 = 1.0_f64.to_radians().cos();
        assert_relative_eq!(p.at(1, 4), 4.0 / (deg_m() * cos1), max_relative = 1e-9);

        let again = centered(&p, Axis::Lon, &g.lon.values, &m);
        assert_eq!((again.col0, again.cols), (1, 4));
    }
}
