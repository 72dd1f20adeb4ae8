//! Operator notification log for Folio.
//!
//! Every successful console mutation, every denied action and every sign-in
//! appends a [`Notification`] to the [`NotificationLog`]. The log lives for
//! the process lifetime only; nothing here is persisted.
//!
//! ```rust
//! use folio_feed::{NotificationLog, Severity};
//!
//! let log = NotificationLog::empty();
//! log.push("Saved", "The item has been updated.", Severity::Info);
//! assert_eq!(log.unread_count(), 1);
//! log.mark_all_read();
//! assert_eq!(log.unread_count(), 0);
//! ```

pub mod error;
pub mod log;
pub mod notification;

pub use error::{FeedError, FeedResult};
pub use log::NotificationLog;
pub use notification::{Notification, Severity};
