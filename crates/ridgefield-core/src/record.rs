//! JSON-friendly representation of a grid.
//!
//! JSON has no NaN, so values are stored as nested rows of `Option<f64>`
//! with `null` standing for a missing value.

use crate::{CoordAxis, GridError, LatLonGrid, LATITUDE, LONGITUDE};
use serde::{Deserialize, Serialize};

fn default_latitude_name() -> String {
    LATITUDE.to_string()
}

fn default_longitude_name() -> String {
    LONGITUDE.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    #[serde(default = "default_latitude_name")]
    pub latitude_name: String,
    #[serde(default = "default_longitude_name")]
    pub longitude_name: String,
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl From<&LatLonGrid> for GridRecord {
    fn from(grid: &LatLonGrid) -> Self {
        let values = (0..grid.rows())
            .map(|r| {
                grid.row(r)
                    .iter()
                    .map(|&v| if v.is_finite() { Some(v) } else { None })
                    .collect()
            })
            .collect();
        Self {
            latitude_name: grid.lat.name.clone(),
            longitude_name: grid.lon.name.clone(),
            latitude: grid.lat.values.clone(),
            longitude: grid.lon.values.clone(),
            values,
        }
    }
}

impl TryFrom<GridRecord> for LatLonGrid {
    type Error = GridError;

    fn try_from(rec: GridRecord) -> Result<Self, Self::Error> {
        let cols = rec.longitude.len();
        let mut data = Vec::with_capacity(rec.latitude.len() * cols);
        for row in &rec.values {
            if row.len() != cols {
                return Err(GridError::ShapeMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend(row.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        LatLonGrid::new(
            CoordAxis::new(rec.latitude_name, rec.latitude),
            CoordAxis::new(rec.longitude_name, rec.longitude),
            data,
        )
    }
}
