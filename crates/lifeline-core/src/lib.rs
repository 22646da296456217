//! lifeline-core: emergency assist library (report validation, guidance
//! orchestration, narration).
//!
//! The gateway holds the API keys and wires the clients; this crate only
//! defines the capability seams (`GenerationClient`, `SpeechClient`) and the
//! flow between them:
//!
//! ```text
//! report text ──▶ Orchestrator ──▶ AssistOutcome (guidance | rate-limited | degraded)
//!                                        │
//!                                        ▼ (optional)
//!                                    Narrator ──▶ AudioClip
//! ```

mod config;
mod error;
mod generation;
mod narration;
mod orchestrator;
mod report;
pub mod prompts;
pub mod reference;

pub use config::{GatewayConfig, LlmMode};
pub use error::{GenerationError, NarrationError, ReportError};
pub use generation::{GenerationClient, LiveGeneration, MockGeneration};
pub use narration::{AudioClip, Narrator, SilentTts, SpeechClient, TranslateTts, NARRATION_LANG};
pub use orchestrator::{AssistOutcome, Orchestrator, RATE_LIMIT_ADVISORY};
pub use report::{EmergencyReport, Guidance};
