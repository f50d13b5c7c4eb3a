use thiserror::Error;

pub type ConversionResult<T> = Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Host environment error: {0}")]
    Host(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ConversionError {
    fn from(err: config::ConfigError) -> Self {
        ConversionError::Config(err.to_string())
    }
}
