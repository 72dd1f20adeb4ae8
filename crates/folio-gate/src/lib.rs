//! Access control for the Folio console.
//!
//! An operator exchanges an access key for a [`Session`] through the
//! [`SessionResolver`]. The session's [`Role`] maps to [`Permissions`] in
//! exactly one place, [`permissions_for`], and everything else asks that
//! mapping:
//!
//! - the [`AdminNavigator`] keeps the active [`Section`] within what the
//!   session may see, redirecting to the overview with a warning
//! - the [`MutationGate`] runs every console mutation through an ordered,
//!   fail-fast pipeline of [`GateStage`]s (capability, then validation)
//!
//! # Quick Start
//!
//! ```rust
//! use folio_gate::{MutationGate, MutationRequest, Role, Session};
//! use folio_types::{Collection, Draft};
//!
//! let gate = MutationGate::default();
//! let draft = Draft::blank(Collection::Projects).unwrap();
//! let viewer = Session::Authenticated { role: Role::Viewer };
//! let result = gate.evaluate(&MutationRequest::save(draft), viewer).unwrap();
//! assert!(result.is_denied());
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod role;
pub mod section;
pub mod session;
pub mod stage;
pub mod stages;

pub use config::{CredentialTable, GateConfig};
pub use error::{GateError, LoginError};
pub use gate::{Decision, GateResult, MutationGate};
pub use role::{permissions_for, Action, Permissions, Role};
pub use section::{AdminNavigator, Section};
pub use session::{Session, SessionResolver};
pub use stage::{GateContext, GateStage, MutationRequest, StageDecision, StageResult};
pub use stages::capability::CapabilityStage;
pub use stages::validation::ValidationStage;
