use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface layout: width={width}, height={height}")]
    InvalidLayout { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
