//! Per-point ridge classification.

use crate::Eigen2;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// Non-fatal numeric anomalies met while classifying points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericDegeneracy {
    /// The Hessian had a complex eigenvalue pair; real parts were used.
    ComplexEigenvalues,
    /// `|cos| > 1` from rounding; the argument was clamped before `acos`.
    ClippedCosine,
    /// The gradient had zero or non-finite norm; the angle is undefined.
    ZeroGradient,
}

/// Occurrence counts per [`NumericDegeneracy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegeneracyCounts {
    pub complex_eigenvalues: usize,
    pub clipped_cosine: usize,
    pub zero_gradient: usize,
}

impl DegeneracyCounts {
    pub fn record(&mut self, d: NumericDegeneracy) {
        match d {
            NumericDegeneracy::ComplexEigenvalues => self.complex_eigenvalues += 1,
            NumericDegeneracy::ClippedCosine => self.clipped_cosine += 1,
            NumericDegeneracy::ZeroGradient => self.zero_gradient += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.complex_eigenvalues + self.clipped_cosine + self.zero_gradient
    }
}

/// Classification of a single lattice point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointClass {
    /// Angle in radians between the swapped dominant eigenvector and the
    /// gradient, in `[0, π]`; NaN when the gradient vanishes.
    pub angle: f64,
    /// `sign(min eigenvalue)`: -1, 0 or +1.
    pub curvature_sign: f64,
    pub complex: bool,
    pub clipped: bool,
}

impl PointClass {
    pub fn degeneracies(&self) -> impl Iterator<Item = NumericDegeneracy> {
        [
            self.complex.then_some(NumericDegeneracy::ComplexEigenvalues),
            self.clipped.then_some(NumericDegeneracy::ClippedCosine),
            self.angle.is_nan().then_some(NumericDegeneracy::ZeroGradient),
        ]
        .into_iter()
        .flatten()
    }

    /// Ridge test: within the angular band and curving downward.
    #[inline]
    pub fn is_ridge(&self, threshold_rad: f64) -> bool {
        self.angle.abs() <= threshold_rad && self.curvature_sign == -1.0
    }
}

/// Sign with an exact zero for zero input and NaN for NaN.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}

/// Classify one point from its Hessian and gradient.
///
/// The eigenvector of the largest-signed eigenvalue is taken with its two
/// components swapped and compared against the gradient.
pub fn classify_point(hessian: &Matrix2<f64>, gradient: &Vector2<f64>) -> PointClass {
    let eig = Eigen2::new(hessian);
    let v = eig.vectors[eig.argmax()];
    let swapped = Vector2::new(v.y, v.x);

    let denom = v.norm() * gradient.norm();
    let mut clipped = false;
    let angle = if denom > 0.0 && denom.is_finite() {
        let cos = swapped.dot(gradient) / denom;
        if cos.abs() > 1.0 {
            clipped = true;
        }
        cos.clamp(-1.0, 1.0).acos()
    } else {
        f64::NAN
    };

    PointClass {
        angle,
        curvature_sign: sign(eig.min_value()),
        complex: eig.complex,
        clipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn ridge_across_x_is_aligned_with_gradient() {
        // curvature only along x, gradient along +x
        let h = Matrix2::new(-2.0, 0.0, 0.0, 0.0);
        let c = classify_point(&h, &Vector2::new(0.3, 0.0));
        assert_relative_eq!(c.angle, 0.0);
        assert_eq!(c.curvature_sign, -1.0);
        assert!(c.is_ridge(5f64.to_radians()));

        let opposite = classify_point(&h, &Vector2::new(-0.3, 0.0));
        assert_relative_eq!(opposite.angle, std::f64::consts::PI);
        assert!(!opposite.is_ridge(5f64.to_radians()));
    }

    #[test]
    fn valley_is_never_a_ridge() {
        let h = Matrix2::new(2.0, 0.0, 0.0, 1.0);
        let c = classify_point(&h, &Vector2::new(0.0, 1.0));
        assert_eq!(c.curvature_sign, 1.0);
        assert!(!c.is_ridge(FRAC_PI_2));
    }

    #[test]
    fn flat_point_has_zero_sign_and_undefined_angle() {
        let c = classify_point(&Matrix2::zeros(), &Vector2::zeros());
        assert_eq!(c.curvature_sign, 0.0);
        assert!(c.angle.is_nan());
        assert!(!c.is_ridge(std::f64::consts::PI));
        assert_eq!(
            c.degeneracies().collect::<Vec<_>>(),
            vec![NumericDegeneracy::ZeroGradient]
        );
    }

    #[test]
    fn perpendicular_gradient() {
        let h = Matrix2::new(-2.0, 0.0, 0.0, 0.0);
        let c = classify_point(&h, &Vector2::new(0.0, 1.0));
        assert_relative_eq!(c.angle, FRAC_PI_2);
    }

    #[test]
    fn counts_accumulate() {
        let mut counts = DegeneracyCounts::default();
        counts.record(NumericDegeneracy::ClippedCosine);
        counts.record(NumericDegeneracy::ZeroGradient);
        counts.record(NumericDegeneracy::ZeroGradient);
        assert_eq!(counts.zero_gradient, 2);
        assert_eq!(counts.total(), 3);
    }
}
