//! The Folio console's edit protocol.
//!
//! [`ContentEditor`] holds at most one open [`Draft`](folio_types::Draft)
//! and turns operator intents (create, edit, save, delete, cancel, lead
//! triage, profile update, export) into whole-document replacements on the
//! shared [`ContentStore`](folio_store::ContentStore).
//!
//! Every mutating call first goes through the
//! [`MutationGate`](folio_gate::MutationGate). A rejected call changes
//! nothing, warns the operator through the notification log, and comes back
//! as [`EditOutcome::Denied`] or [`EditOutcome::Invalid`] rather than as an
//! error. Errors are reserved for real failures: storage I/O, unknown ids,
//! calls that need an open draft.

pub mod editor;
pub mod error;
pub mod filter;
pub mod outcome;

pub use editor::{ContentEditor, EditorState};
pub use error::{EditorError, EditorResult};
pub use filter::filter_items;
pub use outcome::{EditOutcome, Export, ItemSummary, Overview};
