use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Crate-wide error type.
///
/// The enum is `Clone` so one settled in-flight call can hand the same
/// outcome to every caller that joined it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown chart type: `{0}`")]
    UnknownChartKind(String),

    #[error("chart config is missing required field `{field}`")]
    MissingConfigField { field: &'static str },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ChartError {
    /// Returns `true` for failures raised at the remote boundary.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::RequestTimeout | Self::RequestFailed { .. } | Self::Transport(_)
        )
    }
}
