use crate::error::GateError;
use crate::stage::{GateContext, GateStage, MutationRequest, StageDecision};

/// Required-field check for drafts and submitted leads.
pub struct ValidationStage;

impl GateStage for ValidationStage {
    fn name(&self) -> &str {
        "validation"
    }

    fn evaluate(
        &self,
        request: &MutationRequest,
        _context: &GateContext,
    ) -> Result<StageDecision, GateError> {
        if let Some(draft) = &request.draft {
            let missing = draft.missing_fields();
            if !missing.is_empty() {
                return Ok(StageDecision::Fail {
                    reason: format!("missing required fields: {}", missing.join(", ")),
                });
            }
        }

        if let Some(lead) = &request.lead {
            if lead.client_name.trim().is_empty() {
                return Ok(StageDecision::Fail {
                    reason: "name is required".into(),
                });
            }
            if !lead.client_email.contains('@') {
                return Ok(StageDecision::Fail {
                    reason: "a valid email is required".into(),
                });
            }
            if lead.description.trim().is_empty() {
                return Ok(StageDecision::Fail {
                    reason: "description is required".into(),
                });
            }
        }

        Ok(StageDecision::Pass)
    }
}
