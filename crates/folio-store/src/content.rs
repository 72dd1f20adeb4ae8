use std::fmt;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use folio_types::PortfolioDocument;

use crate::defaults::default_document;
use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::traits::BlobStore;

const EVENT_CAPACITY: usize = 64;

/// Where the current in-memory document came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// Parsed from the blob store (or written by this store).
    Stored,
    /// Bundled defaults: nothing stored yet, or the stored payload was unreadable.
    Defaults,
}

/// Change notifications published by the [`ContentStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// This store wrote a new document.
    Replaced { revision: u64 },
    /// A foreign write was adopted by [`ContentStore::sync_external`].
    Resynced { revision: u64 },
}

impl StoreEvent {
    pub fn revision(&self) -> u64 {
        match self {
            Self::Replaced { revision } | Self::Resynced { revision } => *revision,
        }
    }
}

struct Slot {
    document: Arc<PortfolioDocument>,
    revision: u64,
    digest: Option<blake3::Hash>,
    origin: DocumentOrigin,
}

/// Owner of the single [`PortfolioDocument`].
///
/// Reads hand out cheap `Arc` snapshots; writes replace the whole document,
/// persisting it under [`keys::PORTFOLIO_DATA`] before the in-memory slot is
/// swapped. Stale snapshots may race; the last writer wins.
pub struct ContentStore {
    blobs: Arc<dyn BlobStore>,
    slot: RwLock<Slot>,
    events: broadcast::Sender<StoreEvent>,
}

impl ContentStore {
    /// Load the document from `blobs`, falling back to the bundled defaults.
    ///
    /// Never fails. Legacy documents whose entries lack ids get them here;
    /// the normalized form is only written back on the next `replace`.
    pub fn load(blobs: Arc<dyn BlobStore>) -> Self {
        let (document, digest, origin) = match blobs.get(keys::PORTFOLIO_DATA) {
            Ok(Some(raw)) => match parse(&raw) {
                Ok(document) => (document, Some(blake3::hash(raw.as_bytes())), DocumentOrigin::Stored),
                Err(e) => {
                    warn!(error = %e, "stored document is unreadable, using defaults");
                    (default_document(), Some(blake3::hash(raw.as_bytes())), DocumentOrigin::Defaults)
                }
            },
            Ok(None) => {
                debug!("no stored document, using defaults");
                (default_document(), None, DocumentOrigin::Defaults)
            }
            Err(e) => {
                warn!(error = %e, "failed to read stored document, using defaults");
                (default_document(), None, DocumentOrigin::Defaults)
            }
        };

        let mut document = document;
        let assigned = document.normalize();
        if assigned > 0 {
            info!(assigned, "assigned ids to legacy entries");
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            blobs,
            slot: RwLock::new(Slot {
                document: Arc::new(document),
                revision: 0,
                digest,
                origin,
            }),
            events,
        }
    }

    /// The current document.
    pub fn snapshot(&self) -> Arc<PortfolioDocument> {
        Arc::clone(&self.slot.read().expect("lock poisoned").document)
    }

    /// Persist `document` and make it current. Returns the new revision.
    ///
    /// On a blob store failure the in-memory document is left untouched.
    pub fn replace(&self, mut document: PortfolioDocument) -> StoreResult<u64> {
        document.normalize();
        let payload =
            serde_json::to_string(&document).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.blobs.put(keys::PORTFOLIO_DATA, &payload)?;

        let revision = {
            let mut slot = self.slot.write().expect("lock poisoned");
            slot.document = Arc::new(document);
            slot.revision += 1;
            slot.digest = Some(blake3::hash(payload.as_bytes()));
            slot.origin = DocumentOrigin::Stored;
            slot.revision
        };

        debug!(revision, bytes = payload.len(), "document replaced");
        let _ = self.events.send(StoreEvent::Replaced { revision });
        Ok(revision)
    }

    /// Adopt a document written to the blob store by another context.
    ///
    /// Returns `true` when a foreign payload was adopted. A payload that does
    /// not parse is ignored (and remembered, so it is not re-parsed until it
    /// changes again).
    pub fn sync_external(&self) -> StoreResult<bool> {
        let Some(raw) = self.blobs.get(keys::PORTFOLIO_DATA)? else {
            return Ok(false);
        };
        let digest = blake3::hash(raw.as_bytes());
        if self.slot.read().expect("lock poisoned").digest == Some(digest) {
            return Ok(false);
        }

        let mut document = match parse(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable foreign document");
                self.slot.write().expect("lock poisoned").digest = Some(digest);
                return Ok(false);
            }
        };
        document.normalize();

        let revision = {
            let mut slot = self.slot.write().expect("lock poisoned");
            slot.document = Arc::new(document);
            slot.revision += 1;
            slot.digest = Some(digest);
            slot.origin = DocumentOrigin::Stored;
            slot.revision
        };

        info!(revision, "adopted foreign document");
        let _ = self.events.send(StoreEvent::Resynced { revision });
        Ok(true)
    }

    /// Receive a [`StoreEvent`] for every replace and re-sync.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Number of replacements since load.
    pub fn revision(&self) -> u64 {
        self.slot.read().expect("lock poisoned").revision
    }

    /// Hex BLAKE3 digest of the last payload read or written.
    pub fn digest(&self) -> Option<String> {
        self.slot
            .read()
            .expect("lock poisoned")
            .digest
            .map(|d| hex::encode(d.as_bytes()))
    }

    pub fn origin(&self) -> DocumentOrigin {
        self.slot.read().expect("lock poisoned").origin
    }

    /// The underlying blob store, shared with the theme and session keys.
    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }
}

impl fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.read().expect("lock poisoned");
        f.debug_struct("ContentStore")
            .field("revision", &slot.revision)
            .field("origin", &slot.origin)
            .field("subscriber_count", &self.events.receiver_count())
            .finish()
    }
}

fn parse(raw: &str) -> StoreResult<PortfolioDocument> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}
