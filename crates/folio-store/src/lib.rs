//! Persistence for Folio.
//!
//! Everything Folio keeps between runs lives in an opaque key-value blob
//! store: the serialized [`PortfolioDocument`](folio_types::PortfolioDocument),
//! the theme preference, and the operator session flags. The
//! [`ContentStore`] owns the in-memory copy of the document and is the single
//! source of truth for every other component.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileBlobStore`] -- one file per key under a directory
//!
//! # Design Rules
//!
//! 1. The document is read and written whole; there is no field-level API.
//! 2. Loading never fails: a missing or unparsable payload yields the
//!    bundled defaults.
//! 3. Writes go to the blob store first, then the in-memory slot is swapped.
//! 4. Foreign writes are adopted by [`ContentStore::sync_external`]; last
//!    writer wins.

pub mod content;
pub mod defaults;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod theme;
pub mod traits;

pub use content::{ContentStore, DocumentOrigin, StoreEvent};
pub use defaults::default_document;
pub use error::{StoreError, StoreResult};
pub use file::FileBlobStore;
pub use memory::InMemoryBlobStore;
pub use theme::Theme;
pub use traits::BlobStore;
