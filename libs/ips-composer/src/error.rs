//! Error types for the composition pipeline

use summa_models::ResourceType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input is empty: the subject record must be the first element")]
    EmptyInput,

    #[error("first record must be the subject Patient, got {0}")]
    InvalidSubject(ResourceType),

    #[error("subject record carries no id")]
    SubjectMissingId,

    #[error("{resource_type} record at position {position} carries no id")]
    MissingId {
        resource_type: ResourceType,
        position: usize,
    },

    #[error("section entry references {reference}, which is not packaged in the bundle")]
    DanglingReference { reference: String },

    #[error(transparent)]
    Model(#[from] summa_models::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
