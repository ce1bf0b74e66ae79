pub type LayoutResult<T> = Result<T, LayoutError>;

/// Rejected layout input. Degenerate but valid input (no items, all-zero
/// values) is not an error and produces an empty or zero-area box set.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid input: total must be finite and > 0, got {0}")]
    InvalidTotal(f64),

    #[error("invalid input: canvas {axis} must be finite and > 0, got {value}")]
    InvalidCanvas { axis: &'static str, value: f64 },

    #[error("invalid input: item '{name}' has value {value}, expected finite and >= 0")]
    InvalidValue { name: String, value: f64 },

    #[error("invalid input: padding must be finite and >= 0, got {0}")]
    InvalidPadding(f64),
}

impl LayoutError {
    pub fn canvas(axis: &'static str, value: f64) -> Self {
        Self::InvalidCanvas { axis, value }
    }

    pub fn value(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value,
        }
    }
}
