use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// A reader comment on a blog post. Comments live for the session only and
/// are never written to the blob store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: ItemId,
    pub author: String,
    pub body: String,
    /// Formatted submission date.
    pub date: String,
}
