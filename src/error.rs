use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid color expression: {0}")]
    InvalidColor(String),

    #[error("custom property `{0}` is not defined and has no fallback")]
    UnresolvedToken(String),

    #[error("custom property `{token}` exceeds reference depth {depth} (cycle?)")]
    TokenCycle { token: String, depth: usize },

    #[error("var() expansion exceeds {limit} substitutions")]
    TokenExpansionLimit { limit: usize },

    #[error("series key `{0}` is used more than once")]
    DuplicateSeriesKey(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("backend error: {0}")]
    Backend(String),
}
