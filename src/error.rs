use thiserror::Error;

/// Physically degenerate wave parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl WaveError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        WaveError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Errors raised while reading parameters from a line-oriented input.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Wave(#[from] WaveError),
}

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("drawing backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Wave(#[from] WaveError),
}

impl PlotError {
    pub(crate) fn backend<E: std::fmt::Display>(err: E) -> Self {
        PlotError::Backend(err.to_string())
    }
}
