use std::fmt;

use tracing::debug;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::session::Session;
use crate::stage::{GateContext, GateStage, MutationRequest, StageDecision, StageResult};
use crate::stages::{CapabilityStage, ValidationStage};

/// Final verdict of the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected { reason: String },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

// ---------------------------------------------------------------------------
// GateResult
// ---------------------------------------------------------------------------

/// The outcome of running a request through the full pipeline.
#[derive(Clone, Debug)]
pub struct GateResult {
    pub decision: Decision,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
}

impl GateResult {
    pub fn is_accepted(&self) -> bool {
        self.decision.is_accepted()
    }

    /// Name of the stage that rejected the request, if any.
    pub fn rejected_by(&self) -> Option<&str> {
        self.stage_results
            .iter()
            .find(|r| !r.passed)
            .map(|r| r.stage_name.as_str())
    }

    /// Returns `true` if the request was turned away for lack of permission.
    pub fn is_denied(&self) -> bool {
        self.rejected_by() == Some("capability")
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.decision {
            Decision::Rejected { reason } => Some(reason),
            Decision::Accepted => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MutationGate
// ---------------------------------------------------------------------------

/// Ordered pipeline of stages every console mutation passes through.
pub struct MutationGate {
    stages: Vec<Box<dyn GateStage>>,
    config: GateConfig,
}

impl MutationGate {
    /// An empty pipeline. Use [`Self::add_stage`] or
    /// [`Self::with_default_stages`].
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Capability, then validation (unless `require_fields` is off).
    pub fn with_default_stages(config: GateConfig) -> Self {
        let require_fields = config.require_fields;
        let mut gate = Self::new(config);
        gate.add_stage(Box::new(CapabilityStage));
        if require_fields {
            gate.add_stage(Box::new(ValidationStage));
        }
        gate
    }

    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Evaluate `request` on behalf of `session`.
    ///
    /// The pipeline is fail-fast: the first failing stage rejects the
    /// request and later stages do not run.
    pub fn evaluate(
        &self,
        request: &MutationRequest,
        session: Session,
    ) -> Result<GateResult, GateError> {
        let mut context = GateContext::new(session);
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let decision = stage.evaluate(request, &context)?;

            let result = StageResult {
                stage_name: stage.name().to_string(),
                passed: decision.is_pass(),
                reason: match &decision {
                    StageDecision::Pass => None,
                    StageDecision::Fail { reason } => Some(reason.clone()),
                },
            };
            stage_results.push(result.clone());
            context.previous_stages.push(result);

            if let StageDecision::Fail { reason } = decision {
                debug!(stage = stage.name(), action = %request.action, %reason, "mutation rejected");
                return Ok(GateResult {
                    decision: Decision::Rejected { reason },
                    stage_results,
                });
            }
        }

        Ok(GateResult {
            decision: Decision::Accepted,
            stage_results,
        })
    }
}

impl fmt::Debug for MutationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationGate")
            .field("stages", &self.stages)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for MutationGate {
    fn default() -> Self {
        Self::with_default_stages(GateConfig::default())
    }
}
