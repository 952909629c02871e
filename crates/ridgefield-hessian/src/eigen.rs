//! Closed-form eigendecomposition of a general real 2×2 matrix.
//!
//! The Hessian is symmetric in theory, but its off-diagonal entries are not
//! assumed equal here. Eigenvalues are returned in ascending order of their
//! real part; eigenvectors are unit length with their largest-magnitude
//! component made non-negative (first component on ties).

use nalgebra::{Matrix2, Vector2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eigen2 {
    pub values: [f64; 2],
    pub vectors: [Vector2<f64>; 2],
    /// The matrix had a complex conjugate pair; `values` hold the common
    /// real part and `vectors` the real part of the eigenvector.
    pub complex: bool,
}

impl Eigen2 {
    pub fn new(m: &Matrix2<f64>) -> Self {
        let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
        let half_tr = 0.5 * (a + d);
        let half_diff = 0.5 * (a - d);
        let disc = half_diff * half_diff + b * c;

        if disc < 0.0 {
            let v = canonical(Vector2::new(b, -half_diff), 0);
            return Self {
                values: [half_tr, half_tr],
                vectors: [v, v],
                complex: true,
            };
        }

        let s = disc.sqrt();
        let values = [half_tr - s, half_tr + s];
        let vectors = [
            eigenvector(a, b, c, d, values[0], 0),
            eigenvector(a, b, c, d, values[1], 1),
        ];
        Self {
            values,
            vectors,
            complex: false,
        }
    }

    /// Index of the largest-signed eigenvalue (first on ties).
    pub fn argmax(&self) -> usize {
        usize::from(self.values[1] > self.values[0])
    }

    pub fn min_value(&self) -> f64 {
        self.values[0].min(self.values[1])
    }
}

/// Null vector of `M - λI`, picking the better conditioned of the two row
/// based candidates. A scalar matrix has no preferred direction; `slot`
/// then selects the coordinate axis.
fn eigenvector(a: f64, b: f64, c: f64, d: f64, lambda: f64, slot: usize) -> Vector2<f64> {
    let from_first_row = Vector2::new(b, lambda - a);
    let from_second_row = Vector2::new(lambda - d, c);
    let v = if from_first_row.norm_squared() >= from_second_row.norm_squared() {
        from_first_row
    } else {
        from_second_row
    };
    canonical(v, slot)
}

fn canonical(v: Vector2<f64>, slot: usize) -> Vector2<f64> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return if slot == 0 {
            Vector2::x()
        } else {
            Vector2::y()
        };
    }
    let v = v / norm;
    let dominant = if v.y.abs() > v.x.abs() { v.y } else { v.x };
    if dominant < 0.0 {
        -v
    } else {
        v
    }
}
