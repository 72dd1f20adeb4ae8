//! Built-in gate stages.

pub mod capability;
pub mod validation;

pub use capability::CapabilityStage;
pub use validation::ValidationStage;
