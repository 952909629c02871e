use crate::{CoordAxis, GridError};
use serde::{Deserialize, Serialize};

/// Scalar field on a rectilinear latitude/longitude lattice.
///
/// Rows follow `lat`, columns follow `lon`; `data` is row-major with
/// `len = lat.len() * lon.len()`. NaN marks a missing value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLonGrid {
    pub lat: CoordAxis,
    pub lon: CoordAxis,
    pub data: Vec<f64>,
}

impl LatLonGrid {
    /// Build a grid, checking the buffer length and axis monotonicity.
    ///
    /// Empty axes are accepted so that crops with no surviving rows can be
    /// represented.
    pub fn new(lat: CoordAxis, lon: CoordAxis, data: Vec<f64>) -> Result<Self, GridError> {
        let expected = lat.len() * lon.len();
        if data.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        lat.order()?;
        lon.order()?;
        Ok(Self { lat, lon, data })
    }

    pub fn filled(lat: CoordAxis, lon: CoordAxis, value: f64) -> Self {
        let data = vec![value; lat.len() * lon.len()];
        Self { lat, lon, data }
    }

    /// Build a grid by evaluating `f(lat_deg, lon_deg)` at every node.
    pub fn from_fn(
        lat: CoordAxis,
        lon: CoordAxis,
        mut f: impl FnMut(f64, f64) -> f64,
    ) -> Result<Self, GridError> {
        let mut data = Vec::with_capacity(lat.len() * lon.len());
        for &phi in &lat.values {
            for &lambda in &lon.values {
                data.push(f(phi, lambda));
            }
        }
        Self::new(lat, lon, data)
    }

    /// Validate both axes, requiring at least `min_len` points on each.
    pub fn validate(&self, min_len: usize) -> Result<(), GridError> {
        self.lat.validate(min_len)?;
        self.lon.validate(min_len)?;
        let expected = self.rows() * self.cols();
        if self.data.len() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.lat.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.lon.len()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols() + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let w = self.cols();
        &self.data[row * w..(row + 1) * w]
    }

    /// Column `col` copied into a new vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows()).map(|r| self.get(r, col)).collect()
    }

    /// Sub-grid made of the listed rows and columns, in the given order.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for &r in rows {
            let src = self.row(r);
            data.extend(cols.iter().map(|&c| src[c]));
        }
        Self {
            lat: self.lat.select(rows),
            lon: self.lon.select(cols),
            data,
        }
    }

    /// Grid with the latitude rows in reverse storage order.
    pub fn flip_lat(&self) -> Self {
        let rows: Vec<usize> = (0..self.rows()).rev().collect();
        let cols: Vec<usize> = (0..self.cols()).collect();
        self.select(&rows, &cols)
    }

    /// Grid with the longitude columns in reverse storage order.
    pub fn flip_lon(&self) -> Self {
        let rows: Vec<usize> = (0..self.rows()).collect();
        let cols: Vec<usize> = (0..self.cols()).rev().collect();
        self.select(&rows, &cols)
    }

    /// Number of values satisfying `pred`.
    pub fn count(&self, pred: impl Fn(f64) -> bool) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LatLonGrid {
        LatLonGrid::from_fn(
            CoordAxis::latitude(vec![0.0, 1.0, 2.0]),
            CoordAxis::longitude(vec![10.0, 11.0]),
            |phi, lambda| phi * 100.0 + lambda,
        )
        .expect("valid grid")
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = small();
        assert_eq!(g.shape(), (3, 2));
        assert_eq!(g.row(1), &[110.0, 111.0]);
        assert_eq!(g.get(2, 0), 210.0);
        assert_eq!(g.column(1), vec![11.0, 111.0, 211.0]);
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = LatLonGrid::new(
            CoordAxis::latitude(vec![0.0, 1.0]),
            CoordAxis::longitude(vec![0.0, 1.0]),
            vec![0.0; 3],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn flip_lat_reverses_rows_only() {
        let g = small().flip_lat();
        assert_eq!(g.lat.values, vec![2.0, 1.0, 0.0]);
        assert_eq!(g.lon.values, vec![10.0, 11.0]);
        assert_eq!(g.row(0), &[210.0, 211.0]);
    }

    #[test]
    fn flips_are_involutions() {
        let g = small();
        let h = g.flip_lon();
        assert_eq!(h.lon.values, vec![11.0, 10.0]);
        assert_eq!(h.row(2), &[211.0, 210.0]);
        assert_eq!(h.flip_lon(), g);
        assert_eq!(g.flip_lat().flip_lat(), g);
    }
}
