//! Request orchestrator: validate the report, build the prompt, make exactly
//! one generation call, and classify the result into a user-facing outcome.
//!
//! One-shot by design: emergency guidance is time-critical, so a failure is
//! surfaced immediately with a fallback checklist instead of retried.

use crate::error::{GenerationError, ReportError};
use crate::generation::GenerationClient;
use crate::prompts::{assist_user_prompt, ASSIST_SYSTEM};
use crate::reference::FIRST_AID_CHECKLIST;
use crate::report::{EmergencyReport, Guidance};
use std::sync::Arc;

/// Fixed advisory returned when the remote quota is exhausted.
pub const RATE_LIMIT_ADVISORY: &str = "The assistant has hit its rate limit and cannot \
respond right now. Please try again in a few minutes. If this is a life-threatening \
situation, call your local emergency number immediately.";

/// The orchestrator's total result. Remote failures are values here, never
/// raw errors: every variant ends in a rendered message.
#[derive(Debug, Clone)]
pub enum AssistOutcome {
    /// Live guidance, text unmodified from the model.
    Guidance(Guidance),
    /// Remote quota exhausted; advise retry and local emergency numbers.
    RateLimited { advisory: String },
    /// Any other remote failure: raw error detail folded into a fallback
    /// message, alongside the universal first-aid checklist.
    Degraded { message: String, checklist: String },
}

pub struct Orchestrator {
    generation: Arc<dyn GenerationClient>,
}

impl Orchestrator {
    pub fn new(generation: Arc<dyn GenerationClient>) -> Self {
        Self { generation }
    }

    /// Handle one emergency report. Blank input is rejected before any remote
    /// call; a non-blank report makes exactly one generation call.
    pub async fn assist(&self, raw: &str) -> Result<AssistOutcome, ReportError> {
        let report = EmergencyReport::parse(raw)?;
        let prompt = assist_user_prompt(report.as_str());

        match self.generation.generate(ASSIST_SYSTEM, &prompt).await {
            Ok(text) => {
                tracing::info!(target: "lifeline::orchestrator", chars = text.len(), "guidance generated");
                Ok(AssistOutcome::Guidance(Guidance::new(text)))
            }
            Err(GenerationError::RateLimited(detail)) => {
                tracing::warn!(target: "lifeline::orchestrator", "generation rate-limited: {}", detail);
                Ok(AssistOutcome::RateLimited {
                    advisory: RATE_LIMIT_ADVISORY.to_string(),
                })
            }
            Err(err) => {
                tracing::warn!(target: "lifeline::orchestrator", "generation failed: {}", err);
                Ok(AssistOutcome::Degraded {
                    message: format!(
                        "The assistant could not be reached ({}). While you wait, follow the \
                         checklist below and call your local emergency number.",
                        err
                    ),
                    checklist: FIRST_AID_CHECKLIST.to_string(),
                })
            }
        }
    }
}
