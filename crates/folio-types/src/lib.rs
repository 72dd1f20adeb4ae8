//! Foundation types for Folio.
//!
//! This crate provides the document model and identity types shared by every
//! other Folio crate. The whole site lives in one aggregate,
//! [`PortfolioDocument`], which is always replaced wholesale.
//!
//! # Key Types
//!
//! - [`PortfolioDocument`] - Root aggregate: profile, skills, experiences,
//!   projects, packages, blog posts and lead requests
//! - [`ItemId`] - Stable identifier carried by every collection entry
//! - [`Collection`] - The editable collections of the document
//! - [`Draft`] - Working copy of an entry open in the console editor
//! - [`LeadStatus`] - Triage state of an inbound project request
//! - [`Comment`] - Session-scoped reader comment (never persisted)

pub mod collection;
pub mod comment;
pub mod content;
pub mod document;
pub mod draft;
pub mod error;
pub mod id;
pub mod lead;
pub mod temporal;

pub use collection::Collection;
pub use comment::Comment;
pub use content::{BlogPost, Experience, Project, ProjectCategory};
pub use document::{Contact, Package, PortfolioDocument, Profile, SkillCategory};
pub use draft::Draft;
pub use error::TypeError;
pub use id::ItemId;
pub use lead::{LeadCategory, LeadRequest, LeadStatus};
pub use temporal::{display_date, now_ms};
