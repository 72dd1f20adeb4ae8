use folio_gate::GateError;
use folio_store::StoreError;
use folio_types::{Collection, ItemId};

/// Errors from editor operations.
///
/// Permission denials and failed validation are not errors; they are
/// reported through [`crate::EditOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("gate error: {0}")]
    Gate(#[from] GateError),

    /// The target entry is not in the current document.
    #[error("{collection} entry {id} not found")]
    NotFound { collection: Collection, id: ItemId },

    /// An operation that needs an open draft was called while idle.
    #[error("no draft is open")]
    NotEditing,

    /// The collection cannot be edited from the console.
    #[error("{0} cannot be drafted from the console")]
    NotDraftable(Collection),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
