/// Errors from blob store and content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key contains characters the backend cannot store.
    #[error("invalid blob key: {0:?}")]
    InvalidKey(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not valid UTF-8 text.
    #[error("blob {key} is not valid UTF-8")]
    NotUtf8 { key: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
