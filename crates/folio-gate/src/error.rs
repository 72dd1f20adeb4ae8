use folio_store::StoreError;

/// Errors that can occur during gate evaluation.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A stage could not reach a decision.
    #[error("stage error in '{stage}': {message}")]
    StageError { stage: String, message: String },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the persisted session failed.
    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}

impl GateError {
    /// Create a stage error with a name and message.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageError {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl PartialEq for GateError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

/// Errors returned by [`crate::SessionResolver::login`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The access key is not in the credential table.
    #[error("Invalid access key.")]
    InvalidCredential,

    /// The key was accepted but the session could not be persisted.
    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}

impl LoginError {
    /// Message suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
