//! Named coordinate axes.
//!
//! Coordinates are stored in degrees. An axis may run in either direction
//! but must be strictly monotonic; spacing may be non-uniform.

use crate::GridError;
use serde::{Deserialize, Serialize};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Direction of a strictly monotonic axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    Increasing,
    Decreasing,
}

/// A named 1-D coordinate vector in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordAxis {
    pub name: String,
    pub values: Vec<f64>,
}

impl CoordAxis {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn latitude(values: Vec<f64>) -> Self {
        Self::new(LATITUDE, values)
    }

    pub fn longitude(values: Vec<f64>) -> Self {
        Self::new(LONGITUDE, values)
    }

    /// Evenly spaced axis `start, start + step, ...` with `len` points.
    pub fn linspace(name: impl Into<String>, start: f64, step: f64, len: usize) -> Self {
        let values = (0..len).map(|k| start + step * k as f64).collect();
        Self::new(name, values)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check finiteness and strict monotonicity.
    ///
    /// Axes with fewer than two points are trivially monotonic and reported
    /// as increasing.
    pub fn order(&self) -> Result<AxisOrder, GridError> {
        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(GridError::NonFiniteCoordinate {
                axis: self.name.clone(),
                index,
            });
        }
        if self.values.len() < 2 {
            return Ok(AxisOrder::Increasing);
        }

        let order = if self.values[1] > self.values[0] {
            AxisOrder::Increasing
        } else {
            AxisOrder::Decreasing
        };
        for (k, w) in self.values.windows(2).enumerate() {
            let ok = match order {
                AxisOrder::Increasing => w[1] > w[0],
                AxisOrder::Decreasing => w[1] < w[0],
            };
            if !ok {
                return Err(GridError::NonMonotonic {
                    axis: self.name.clone(),
                    index: k + 1,
                });
            }
        }
        Ok(order)
    }

    /// Validate the axis and require at least `min_len` points.
    pub fn validate(&self, min_len: usize) -> Result<AxisOrder, GridError> {
        if self.values.is_empty() {
            return Err(GridError::EmptyAxis {
                axis: self.name.clone(),
            });
        }
        if self.values.len() < min_len {
            return Err(GridError::AxisTooShort {
                axis: self.name.clone(),
                len: self.values.len(),
                min: min_len,
            });
        }
        self.order()
    }

    /// Coordinates converted to radians.
    pub fn radians(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.to_radians()).collect()
    }

    /// Axis restricted to an explicit index list.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::new(
            self.name.clone(),
            indices.iter().map(|&k| self.values[k]).collect(),
        )
    }

    /// Same axis with its coordinates in reverse order.
    pub fn reversed(&self) -> Self {
        let mut values = self.values.clone();
        values.reverse();
        Self::new(self.name.clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn detects_both_directions() {
        let inc = CoordAxis::latitude(vec![-10.0, 0.0, 5.0]);
        let dec = CoordAxis::latitude(vec![60.0, 59.5, 40.0]);
        assert_eq!(inc.order(), Ok(AxisOrder::Increasing));
        assert_eq!(dec.order(), Ok(AxisOrder::Decreasing));
    }

    #[test]
    fn rejects_repeated_coordinate() {
        let axis = CoordAxis::longitude(vec![0.0, 1.0, 1.0, 2.0]);
        assert_eq!(
            axis.order(),
            Err(GridError::NonMonotonic {
                axis: LONGITUDE.to_string(),
                index: 2
            })
        );
    }

    #[test]
    fn rejects_nan_coordinate() {
        let axis = CoordAxis::longitude(vec![0.0, f64::NAN, 2.0]);
        assert!(matches!(
            axis.order(),
            Err(GridError::NonFiniteCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn validate_enforces_min_len() {
        let axis = CoordAxis::latitude(vec![0.0, 1.0]);
        assert!(axis.validate(2).is_ok());
        assert!(matches!(
            axis.validate(3),
            Err(GridError::AxisTooShort { len: 2, min: 3, .. })
        ));
        assert!(matches!(
            CoordAxis::latitude(Vec::new()).validate(1),
            Err(GridError::EmptyAxis { .. })
        ));
    }

    #[test]
    fn linspace_and_radians() {
        let axis = CoordAxis::linspace(LATITUDE, 90.0, -45.0, 5);
        assert_eq!(axis.values, vec![90.0, 45.0, 0.0, -45.0, -90.0]);
        let rad = axis.radians();
        assert_relative_eq!(rad[0], std::f64::consts::FRAC_PI_2, epsilon = 1e-15);
        assert_relative_eq!(rad[3], -std::f64::consts::FRAC_PI_4, epsilon = 1e-15);
    }
}
