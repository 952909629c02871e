use ridgefield_core::{LatLonGrid, EARTH_RADIUS_M};

/// Physical cell sizes on the sphere, in metres.
///
/// Spacings are backward differences labelled at the upper index, so index
/// 0 of each axis has no spacing (stored as NaN).
#[derive(Clone, Debug)]
pub struct SpacingMetric {
    cos_lat: Vec<f64>,
    dlon_m: Vec<f64>,
    dlat_m: Vec<f64>,
    lon_step_deg: f64,
    lat_step_deg: f64,
}

impl SpacingMetric {
    pub fn new(grid: &LatLonGrid) -> Self {
        let lat = grid.lat.radians();
        let lon = grid.lon.radians();
        Self {
            cos_lat: lat.iter().map(|phi| phi.cos()).collect(),
            dlon_m: backward_metres(&lon),
            dlat_m: backward_metres(&lat),
            lon_step_deg: first_step(&grid.lon.values),
            lat_step_deg: first_step(&grid.lat.values),
        }
    }

    /// `dx(row, col) = Δλ(col) · R · cos φ(row)`.
    #[inline]
    pub fn dx(&self, row: usize, col: usize) -> f64 {
        self.dlon_m[col] * self.cos_lat[row]
    }

    /// `dy(row) = Δφ(row) · R`.
    #[inline]
    pub fn dy(&self, row: usize) -> f64 {
        self.dlat_m[row]
    }

    /// Rescaling applied to centered longitude derivatives: `2 · (λ1 - λ0)`.
    #[inline]
    pub fn lon_scaling(&self) -> f64 {
        2.0 * self.lon_step_deg
    }

    /// Rescaling applied to centered latitude derivatives: `2 · (φ1 - φ0)`.
    ///
    /// Used for `dy` and `dyy`; it differs from [`Self::lon_scaling`] only when
    /// the two axes have different steps.
    #[inline]
    pub fn lat_scaling(&self) -> f64 {
        2.0 * self.lat_step_deg
    }
}

fn backward_metres(rad: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(rad.len());
    if !rad.is_empty() {
        out.push(f64::NAN);
    }
    out.extend(rad.windows(2).map(|w| (w[1] - w[0]) * EARTH_RADIUS_M));
    out
}

fn first_step(values: &[f64]) -> f64 {
    match values {
        [a, b, ..] => b - a,
        _ => f64::NAN,
    }
}
