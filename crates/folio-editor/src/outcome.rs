use serde::{Deserialize, Serialize};

use folio_types::{BlogPost, ItemId};

/// What an editor call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// A draft is now open.
    Editing,
    /// The draft was written to the store.
    Saved { id: ItemId, created: bool, revision: u64 },
    /// The entry was removed from the store.
    Deleted { id: ItemId, revision: u64 },
    /// A lead moved to its next triage state.
    LeadUpdated { id: ItemId, revision: u64 },
    /// The profile was replaced.
    ProfileUpdated { revision: u64 },
    /// The document was serialized for download.
    Exported(Export),
    /// The session lacks the permission; nothing changed.
    Denied { reason: String },
    /// Required fields are missing; the draft stays open.
    Invalid { reason: String },
    /// The confirmation callback declined; nothing changed.
    Declined,
}

impl EditOutcome {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    /// Returns `true` if the call changed the stored document.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            Self::Saved { .. }
                | Self::Deleted { .. }
                | Self::LeadUpdated { .. }
                | Self::ProfileUpdated { .. }
        )
    }
}

/// A full-document backup ready to be written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    /// `backup-<timestamp-ms>.json`
    pub file_name: String,
    /// Pretty-printed document JSON.
    pub contents: String,
}

/// Dashboard counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub post_count: usize,
    pub project_count: usize,
    pub experience_count: usize,
    pub new_lead_count: usize,
    /// Up to four of the most recent posts.
    pub recent_posts: Vec<BlogPost>,
}

/// One row of a console list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: ItemId,
    pub title: String,
    pub subtitle: String,
}
