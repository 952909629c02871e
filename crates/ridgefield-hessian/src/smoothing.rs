//! Separable Gaussian smoothing in index space.
//!
//! The kernel is `exp(-k² / (2σ²))` for `|k| <= floor(truncate·σ + 0.5)`,
//! normalised to unit sum. It is applied along the latitude axis first, then
//! along longitude. Distances are grid steps, not metres.

use crate::BoundaryMode;
use ridgefield_core::LatLonGrid;

/// Normalised 1-D Gaussian taps for `sigma` (in grid cells).
pub fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (truncate * sigma + 0.5).floor() as isize;
    let inv = -0.5 / (sigma * sigma);
    let mut taps: Vec<f64> = (-radius..=radius)
        .map(|k| (inv * (k * k) as f64).exp())
        .collect();
    let sum: f64 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Map an out-of-range index onto `0..n`; `None` means "use zero".
#[inline]
fn extend_index(k: isize, n: usize, mode: BoundaryMode) -> Option<usize> {
    let n_i = n as isize;
    if (0..n_i).contains(&k) {
        return Some(k as usize);
    }
    match mode {
        BoundaryMode::Constant => None,
        BoundaryMode::Nearest => Some(k.clamp(0, n_i - 1) as usize),
        BoundaryMode::Wrap => Some(k.rem_euclid(n_i) as usize),
        BoundaryMode::Reflect => {
            let period = 2 * n_i;
            let m = k.rem_euclid(period);
            Some(if m < n_i { m } else { period - 1 - m } as usize)
        }
        BoundaryMode::Mirror => {
            if n == 1 {
                return Some(0);
            }
            let period = 2 * n_i - 2;
            let m = k.rem_euclid(period);
            Some(if m < n_i { m } else { period - m } as usize)
        }
    }
}

/// Correlate a strided 1-D line with `taps`.
fn correlate_line(
    src: &[f64],
    start: usize,
    stride: usize,
    n: usize,
    taps: &[f64],
    mode: BoundaryMode,
    out: &mut [f64],
) {
    let radius = (taps.len() / 2) as isize;
    for i in 0..n {
        let mut acc = 0.0;
        for (t, &w) in taps.iter().enumerate() {
            let k = i as isize + t as isize - radius;
            if let Some(j) = extend_index(k, n, mode) {
                acc += w * src[start + j * stride];
            }
        }
        out[start + i * stride] = acc;
    }
}

/// Smooth `grid` with an isotropic Gaussian of width `sigma` grid cells.
pub fn gaussian_filter(
    grid: &LatLonGrid,
    sigma: f64,
    truncate: f64,
    mode: BoundaryMode,
) -> LatLonGrid {
    let taps = gaussian_kernel(sigma, truncate);
    if taps.len() == 1 || grid.is_empty() {
        return grid.clone();
    }

    let (rows, cols) = grid.shape();
    let mut tmp = vec![0.0; grid.data.len()];
    for c in 0..cols {
        correlate_line(&grid.data, c, cols, rows, &taps, mode, &mut tmp);
    }
    let mut out = vec![0.0; grid.data.len()];
    for r in 0..rows {
        correlate_line(&tmp, r * cols, 1, cols, &taps, mode, &mut out);
    }

    LatLonGrid {
        lat: grid.lat.clone(),
        lon: grid.lon.clone(),
        data: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ridgefield_core::CoordAxis;

    fn grid(rows: usize, cols: usize, data: Vec<f64>) -> LatLonGrid {
        LatLonGrid::new(
            CoordAxis::linspace("latitude", 0.0, 1.0, rows),
            CoordAxis::linspace("longitude", 0.0, 1.0, cols),
            data,
        )
        .expect("grid")
    }

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = gaussian_kernel(1.0, 4.0);
        assert_eq!(k.len(), 9);
        assert_relative_eq!(k.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        for i in 0..k.len() / 2 {
            assert_relative_eq!(k[i], k[k.len() - 1 - i]);
        }
        assert_eq!(gaussian_kernel(0.5, 4.0).len(), 5);
        assert_eq!(gaussian_kernel(0.1, 4.0), vec![1.0]);
    }

    #[test]
    fn boundary_index_conventions() {
        // a b c d with n = 4
        let map = |k, mode| extend_index(k, 4, mode);
        assert_eq!(map(-1, BoundaryMode::Reflect), Some(0));
        assert_eq!(map(-2, BoundaryMode::Reflect), Some(1));
        assert_eq!(map(4, BoundaryMode::Reflect), Some(3));
        assert_eq!(map(-1, BoundaryMode::Mirror), Some(1));
        assert_eq!(map(4, BoundaryMode::Mirror), Some(2));
        assert_eq!(map(-3, BoundaryMode::Nearest), Some(0));
        assert_eq!(map(5, BoundaryMode::Wrap), Some(1));
        assert_eq!(map(-1, BoundaryMode::Constant), None);
        assert_eq!(map(-7, BoundaryMode::Mirror), Some(1));
    }

    #[test]
    fn constant_field_is_preserved_by_reflect() {
        let g = grid(4, 5, vec![3.5; 20]);
        let s = gaussian_filter(&g, 1.0, 4.0, BoundaryMode::Reflect);
        for v in &s.data {
            assert_relative_eq!(*v, 3.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_mode_darkens_edges() {
        let g = grid(5, 5, vec![1.0; 25]);
        let s = gaussian_filter(&g, 1.0, 4.0, BoundaryMode::Constant);
        assert!(s.get(0, 0) < s.get(2, 2));
        assert!(s.get(2, 2) < 1.0);
    }

    #[test]
    fn impulse_spreads_symmetrically_and_keeps_mass() {
        let mut data = vec![0.0; 49];
        data[3 * 7 + 3] = 1.0;
        let g = grid(7, 7, data);
        let s = gaussian_filter(&g, 0.8, 4.0, BoundaryMode::Reflect);
        assert_relative_eq!(s.get(3, 2), s.get(3, 4), epsilon = 1e-15);
        assert_relative_eq!(s.get(2, 3), s.get(4, 3), epsilon = 1e-15);
        assert_relative_eq!(s.data.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(s.get(3, 3) < 1.0);
    }

    #[test]
    fn zero_sigma_is_identity() {
        let g = grid(3, 3, (0..9).map(|v| v as f64).collect());
        assert_eq!(gaussian_filter(&g, 0.0, 4.0, BoundaryMode::Reflect), g);
    }
}
