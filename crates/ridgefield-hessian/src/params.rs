use crate::RidgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Finite-difference stencil used for the gradient and the Hessian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScheme {
    /// Backward difference `f[i] - f[i-1]`, labelled at `i`.
    ///
    /// Each differentiation drops the first index along its axis, so the
    /// Hessian lattice loses two rows and two columns.
    #[default]
    FirstOrder,
    /// Centered difference in coordinate space (one-sided at the edges),
    /// rescaled by twice the first angular step and divided by the
    /// physical spacing. The lattice loses one row and one column.
    SecondOrder,
}

impl DifferenceScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstOrder => "first_order",
            Self::SecondOrder => "second_order",
        }
    }

    /// Minimal number of points per axis accepted by this scheme.
    pub fn min_axis_len(&self) -> usize {
        match self {
            Self::FirstOrder => 2,
            Self::SecondOrder => 3,
        }
    }

    /// Rows/columns lost at the start of each axis by the Hessian stage.
    pub fn crop(&self) -> usize {
        match self {
            Self::FirstOrder => 2,
            Self::SecondOrder => 1,
        }
    }
}

impl fmt::Display for DifferenceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifferenceScheme {
    type Err = RidgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_order" => Ok(Self::FirstOrder),
            "second_order" => Ok(Self::SecondOrder),
            other => Err(RidgeError::config(format!(
                "unknown scheme `{other}` (expected `first_order` or `second_order`)"
            ))),
        }
    }
}

/// How the Gaussian filter extends the field past its edges.
///
/// Named after the conventions used by common image filters; for a row
/// `a b c d`:
/// - `Reflect`:  `d c b a | a b c d | d c b a`
/// - `Mirror`:   `d c b | a b c d | c b a`
/// - `Nearest`:  `a a a | a b c d | d d d`
/// - `Wrap`:     `b c d | a b c d | a b c`
/// - `Constant`: `0 0 0 | a b c d | 0 0 0`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    Reflect,
    Mirror,
    Nearest,
    Wrap,
    Constant,
}

impl BoundaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reflect => "reflect",
            Self::Mirror => "mirror",
            Self::Nearest => "nearest",
            Self::Wrap => "wrap",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryMode {
    type Err = RidgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(Self::Reflect),
            "mirror" => Ok(Self::Mirror),
            "nearest" => Ok(Self::Nearest),
            "wrap" => Ok(Self::Wrap),
            "constant" => Ok(Self::Constant),
            other => Err(RidgeError::config(format!("unknown boundary mode `{other}`"))),
        }
    }
}

/// Parameters of the Hessian ridge detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeParams {
    /// Gaussian smoothing strength in grid cells; `None` disables smoothing.
    pub sigma: Option<f64>,
    /// Finite-difference stencil.
    pub scheme: DifferenceScheme,
    /// Allowed deviation (degrees) between the swapped dominant eigenvector
    /// and the gradient.
    pub angle_deg: f64,
    /// Edge extension of the smoothing filter.
    pub boundary: BoundaryMode,
    /// Smoothing kernel radius in units of `sigma`.
    pub truncate: f64,
}

impl Default for RidgeParams {
    fn default() -> Self {
        Self {
            sigma: Some(0.5),
            scheme: DifferenceScheme::FirstOrder,
            angle_deg: 5.0,
            boundary: BoundaryMode::Reflect,
            truncate: 4.0,
        }
    }
}

impl RidgeParams {
    /// Default parameters without smoothing.
    pub fn unsmoothed() -> Self {
        Self {
            sigma: None,
            ..Self::default()
        }
    }

    #[inline]
    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    pub fn validate(&self) -> Result<(), RidgeError> {
        if let Some(sigma) = self.sigma {
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(RidgeError::config(format!(
                    "sigma must be finite and >= 0, got {sigma}"
                )));
            }
        }
        if !self.angle_deg.is_finite() || self.angle_deg < 0.0 {
            return Err(RidgeError::config(format!(
                "angle must be finite and >= 0 degrees, got {}",
                self.angle_deg
            )));
        }
        if !self.truncate.is_finite() || self.truncate <= 0.0 {
            return Err(RidgeError::config(format!(
                "truncate must be finite and > 0, got {}",
                self.truncate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_parses_known_names_only() {
        assert_eq!("first_order".parse::<DifferenceScheme>(), Ok(DifferenceScheme::FirstOrder));
        assert_eq!("second_order".parse::<DifferenceScheme>(), Ok(DifferenceScheme::SecondOrder));
        assert!(matches!(
            "third_order".parse::<DifferenceScheme>(),
            Err(RidgeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn defaults_follow_reference_behaviour() {
        let p = RidgeParams::default();
        assert_eq!(p.sigma, Some(0.5));
        assert_eq!(p.scheme, DifferenceScheme::FirstOrder);
        assert_eq!(p.angle_deg, 5.0);
        assert_eq!(p.boundary, BoundaryMode::Reflect);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: RidgeParams =
            serde_json::from_str(r#"{"sigma": null, "scheme": "second_order"}"#).expect("json");
        assert_eq!(p.sigma, None);
        assert_eq!(p.scheme, DifferenceScheme::SecondOrder);
        assert_eq!(p.angle_deg, 5.0);
    }

    #[test]
    fn unknown_scheme_in_json_is_rejected() {
        assert!(serde_json::from_str::<RidgeParams>(r#"{"scheme": "spectral"}"#).is_err());
    }

    #[test]
    fn rejects_negative_values() {
        let p = RidgeParams {
            sigma: Some(-1.0),
            ..RidgeParams::default()
        };
        assert!(p.validate().is_err());
        let p = RidgeParams {
            angle_deg: f64::NAN,
            ..RidgeParams::default()
        };
        assert!(p.validate().is_err());
    }
}
