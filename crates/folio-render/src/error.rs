use folio_gate::GateError;
use folio_store::StoreError;

/// Errors from the public-facing operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A submitted form failed validation.
    #[error("invalid submission: {0}")]
    Invalid(String),

    /// The referenced post does not exist.
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// A tokenizer pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A spawned submission task did not complete.
    #[error("submission task failed: {0}")]
    Task(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("gate error: {0}")]
    Gate(#[from] GateError),
}

pub type RenderResult<T> = Result<T, RenderError>;
