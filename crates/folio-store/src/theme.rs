use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::traits::BlobStore;

/// Visitor-facing colour scheme, persisted under [`keys::THEME`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Read the stored preference. Missing or unknown values mean [`Theme::Dark`].
    pub fn load(blobs: &dyn BlobStore) -> StoreResult<Self> {
        let stored = blobs.get(keys::THEME)?;
        Ok(stored.and_then(|s| s.parse().ok()).unwrap_or_default())
    }

    pub fn save(self, blobs: &dyn BlobStore) -> StoreResult<()> {
        debug!(theme = %self, "saving theme");
        blobs.put(keys::THEME, self.as_str())
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(StoreError::InvalidKey(format!("unknown theme: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBlobStore;

    #[test]
    fn default_is_dark() {
        let blobs = InMemoryBlobStore::new();
        assert_eq!(Theme::load(&blobs).unwrap(), Theme::Dark);
    }

    #[test]
    fn save_and_load() {
        let blobs = InMemoryBlobStore::new();
        Theme::Light.save(&blobs).unwrap();
        assert_eq!(blobs.get(keys::THEME).unwrap().as_deref(), Some("light"));
        assert_eq!(Theme::load(&blobs).unwrap(), Theme::Light);
    }

    #[test]
    fn unknown_value_falls_back_to_dark() {
        let blobs = InMemoryBlobStore::new();
        blobs.put(keys::THEME, "sepia").unwrap();
        assert_eq!(Theme::load(&blobs).unwrap(), Theme::Dark);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
}
