use thiserror::Error;

use crate::{api_client::ApiError, config::ConfigError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Credentials error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Calculation(#[from] reckon_core::CalculationError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;
