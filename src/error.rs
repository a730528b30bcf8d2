use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// No finite values to range over. Callers that prefer a partial chart
    /// over no chart fall back to `Range::fallback()`.
    #[error("no finite values to compute a range from")]
    EmptyData,

    /// Explicit axis bounds are contradictory. Always propagated.
    #[error("invalid explicit range: minimum={minimum} > maximum={maximum}")]
    InvalidRange { minimum: f64, maximum: f64 },

    /// Non-positive input to a logarithmic mapping. Series projection
    /// recovers by marking the offending point empty.
    #[error("value {value} is outside the logarithmic domain")]
    Domain { value: f64 },

    #[error("invalid plot area: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
