use crate::chart::ChartSpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolscopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown pool alias: {0}")]
    UnknownAlias(String),

    #[error("Invalid chart specification: {0}")]
    InvalidChartSpec(#[from] ChartSpecError),

    #[error("Unrecognised action: {0}")]
    UnrecognisedAction(String),

    #[error("Pool facade query failed: {0}")]
    Facade(String),

    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, PoolscopeError>;
