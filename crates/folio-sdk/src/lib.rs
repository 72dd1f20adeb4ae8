//! High-level SDK for Folio.
//!
//! [`Folio`] is the main entry point: it owns one content store and wires
//! the session resolver, mutation gate, content editor, notification log
//! and public renderer around it. Applications that only need one part can
//! depend on the lower crates directly.
//!
//! ```no_run
//! use folio_sdk::{Folio, Section};
//!
//! # fn main() -> folio_sdk::SdkResult<()> {
//! let folio = Folio::open(std::path::Path::new("./folio-data"))?;
//! folio.login("admin")?;
//! assert_eq!(folio.navigate(Section::Leads), Section::Leads);
//! println!("{} posts", folio.document().blog_posts.len());
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod folio;

pub use assistant::{Assistant, AssistantError, MediaGenerator, TextGenerator};
pub use config::{FeedConfig, FolioConfig, CONFIG_FILE, STORE_DIR};
pub use error::{SdkError, SdkResult};
pub use folio::{Folio, PostPage};

// Re-export key types
pub use folio_editor::{EditOutcome, EditorState, Export, ItemSummary, Overview};
pub use folio_feed::{Notification, Severity};
pub use folio_gate::{Action, Permissions, Role, Section, Session};
pub use folio_render::{LeadForm, SearchLimits, SearchResults};
pub use folio_store::Theme;
pub use folio_types::{
    BlogPost, Collection, Comment, Draft, Experience, ItemId, LeadCategory, LeadRequest,
    LeadStatus, PortfolioDocument, Profile, Project,
};
