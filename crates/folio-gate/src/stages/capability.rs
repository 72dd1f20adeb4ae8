use crate::error::GateError;
use crate::stage::{GateContext, GateStage, MutationRequest, StageDecision};

/// Role check.
///
/// Passes when the session's permissions allow the requested action.
pub struct CapabilityStage;

impl GateStage for CapabilityStage {
    fn name(&self) -> &str {
        "capability"
    }

    fn evaluate(
        &self,
        request: &MutationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, GateError> {
        if context.session.permissions().allows(request.action) {
            return Ok(StageDecision::Pass);
        }
        let who = match context.session.role() {
            Some(role) => role.to_string(),
            None => "an unauthenticated session".to_string(),
        };
        Ok(StageDecision::Fail {
            reason: format!("{who} may not {}", request.action),
        })
    }
}
