use thiserror::Error;

pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse payload: {0}")]
    Parse(String),
}
