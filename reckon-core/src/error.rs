use thiserror::Error;

use crate::calculation::CalculationError;
use crate::record::RepositoryError;
use crate::revocation::RevocationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Revocation error: {0}")]
    Revocation(#[from] RevocationError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
