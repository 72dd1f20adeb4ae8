use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for an entry in one of the document's collections.
///
/// Blog posts keep their historical `blog-<timestamp-ms>` shape. Every other
/// collection uses `<prefix>-<uuid v7>`, which is time-ordered and never
/// reused. An empty id marks an entry persisted before ids existed; such
/// entries are given an id by [`crate::PortfolioDocument::normalize`].
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh `<prefix>-<uuid v7>` identifier.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", uuid::Uuid::now_v7().simple()))
    }

    /// Blog post identifier for a creation timestamp in milliseconds.
    pub fn blog(timestamp_ms: u64) -> Self {
        Self(format!("blog-{timestamp_ms}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the placeholder id of a legacy entry.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Short form for logs (prefix plus the first eight id characters).
    pub fn short_id(&self) -> String {
        match self.0.split_once('-') {
            Some((prefix, rest)) => {
                let head: String = rest.chars().take(8).collect();
                format!("{prefix}-{head}")
            }
            None => self.0.clone(),
        }
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
