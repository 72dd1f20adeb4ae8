//! The public side of Folio.
//!
//! Read-only views over the current document ([`search`], [`filter_posts`],
//! [`related_posts`]), HTML rendering of article bodies
//! ([`MarkdownRenderer`], [`Highlighter`]), and the two visitor
//! submissions: comments ([`CommentBoard`], session-scoped) and project
//! requests ([`LeadIntake`], appended to the document). Both submissions
//! run as tokio tasks.

pub mod comments;
pub mod error;
pub mod highlight;
pub mod leads;
pub mod markdown;
pub mod related;
pub mod search;

pub use comments::CommentBoard;
pub use error::{RenderError, RenderResult};
pub use highlight::{escape_html, Highlighter, TokenClass};
pub use leads::{LeadForm, LeadIntake};
pub use markdown::MarkdownRenderer;
pub use related::{related_posts, relatedness, RELATED_LIMIT};
pub use search::{filter_posts, search, SearchLimits, SearchResults};
