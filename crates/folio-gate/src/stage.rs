use std::fmt;

use folio_types::{Collection, Draft, LeadRequest};

use crate::error::GateError;
use crate::role::Action;
use crate::session::Session;

// ---------------------------------------------------------------------------
// MutationRequest
// ---------------------------------------------------------------------------

/// What the caller wants to change, as seen by the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRequest {
    pub action: Action,
    /// Collection touched, if the action targets one.
    pub collection: Option<Collection>,
    /// The draft being saved, for create and update.
    pub draft: Option<Draft>,
    /// The lead being submitted through the public form.
    pub lead: Option<LeadRequest>,
}

impl MutationRequest {
    /// A request carrying nothing but the action.
    pub fn action(action: Action) -> Self {
        Self {
            action,
            collection: None,
            draft: None,
            lead: None,
        }
    }

    /// A save of `draft`: create when it has no id, update otherwise.
    pub fn save(draft: Draft) -> Self {
        let action = if draft.is_new() { Action::Create } else { Action::Update };
        Self {
            action,
            collection: Some(draft.collection()),
            draft: Some(draft),
            lead: None,
        }
    }

    pub fn delete(collection: Collection) -> Self {
        Self {
            collection: Some(collection),
            ..Self::action(Action::Delete)
        }
    }

    pub fn submit_lead(lead: LeadRequest) -> Self {
        Self {
            collection: Some(Collection::LeadRequests),
            lead: Some(lead),
            ..Self::action(Action::SubmitLead)
        }
    }
}

// ---------------------------------------------------------------------------
// StageDecision / StageResult
// ---------------------------------------------------------------------------

/// The outcome of a single gate stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    Pass,
    Fail { reason: String },
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug)]
pub struct StageResult {
    pub stage_name: String,
    pub passed: bool,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// Contextual information available to every gate stage.
#[derive(Clone, Debug)]
pub struct GateContext {
    pub session: Session,
    /// Results from stages that already ran in this evaluation.
    pub previous_stages: Vec<StageResult>,
}

impl GateContext {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            previous_stages: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// GateStage trait
// ---------------------------------------------------------------------------

/// A single evaluation stage in the mutation gate.
///
/// Stages run in order and the first failure stops the pipeline.
pub trait GateStage: Send + Sync {
    /// Short stage name (e.g. "capability", "validation").
    fn name(&self) -> &str;

    fn evaluate(
        &self,
        request: &MutationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, GateError>;
}

impl fmt::Debug for dyn GateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GateStage({})", self.name())
    }
}
