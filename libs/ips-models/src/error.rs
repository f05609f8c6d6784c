//! Error types for the summary models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
