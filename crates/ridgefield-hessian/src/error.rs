use ridgefield_core::GridError;

/// Errors returned by the ridge detector.
///
/// Both variants are raised before any differentiation starts; per-point
/// numeric trouble is handled by dropping or flagging points instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RidgeError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl RidgeError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
