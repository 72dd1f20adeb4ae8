use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("unknown project category: {0}")]
    UnknownProjectCategory(String),

    #[error("unknown lead category: {0}")]
    UnknownLeadCategory(String),

    #[error("unknown lead status: {0}")]
    UnknownLeadStatus(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
