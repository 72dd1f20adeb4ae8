use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_gate::GateConfig;
use folio_render::SearchLimits;

use crate::error::{SdkError, SdkResult};

/// File name of the configuration inside a data directory.
pub const CONFIG_FILE: &str = "folio.toml";

/// Directory under the data directory holding the blob files.
pub const STORE_DIR: &str = "store";

/// Settings for the operator notification log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Keep at most this many notifications; unbounded when absent.
    pub capacity: Option<usize>,
    /// Start with the sign-in and backup entries.
    pub seed: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            seed: true,
        }
    }
}

/// Top-level Folio configuration, read from `folio.toml`.
///
/// ```toml
/// [gate.credentials]
/// "s3cret" = "SUPER_ADMIN"
///
/// [search]
/// posts = 10
///
/// [feed]
/// capacity = 50
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub gate: GateConfig,
    pub search: SearchLimits,
    pub feed: FeedConfig,
    /// Delay applied to comment submissions, in milliseconds.
    pub comment_latency_ms: u64,
}

impl FolioConfig {
    /// Parse a configuration. A zero `[feed] capacity` is rejected.
    pub fn from_toml_str(raw: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| SdkError::Config(e.to_string()))?;
        if config.feed.capacity == Some(0) {
            return Err(SdkError::Config("feed capacity must be at least 1".into()));
        }
        Ok(config)
    }

    /// Read `<data_dir>/folio.toml`, or the defaults when the file is absent.
    pub fn load(data_dir: &Path) -> SdkResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }
}
