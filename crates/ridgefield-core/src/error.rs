/// Errors raised while building or validating latitude/longitude grids.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("axis `{axis}` is empty")]
    EmptyAxis { axis: String },

    #[error("axis `{axis}` has {len} points, need at least {min}")]
    AxisTooShort { axis: String, len: usize, min: usize },

    #[error("axis `{axis}` is not strictly monotonic at index {index}")]
    NonMonotonic { axis: String, index: usize },

    #[error("axis `{axis}` has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate { axis: String, index: usize },

    #[error("grid data length mismatch (expected {expected} values, got {got})")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("coordinate `{name}` not present in grid (axes: `{lat}`, `{lon}`)")]
    MissingAxis {
        name: String,
        lat: String,
        lon: String,
    },
}
