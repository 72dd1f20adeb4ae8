/// Errors from notification log operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("notification not found: {0}")]
    NotFound(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
