//! Error types for the assist pipeline.
//!
//! Remote failures are classified at the client boundary into typed variants
//! (rate-limited vs. everything else) so the orchestrator matches on an enum
//! instead of inspecting error strings.

use thiserror::Error;

/// Rejection of user input before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Please describe the emergency.")]
    Empty,
}

/// Failures from the generation service, classified by the client.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Remote quota exhausted (HTTP 429 or a RESOURCE_EXHAUSTED body).
    #[error("Generation rate limit exceeded: {0}")]
    RateLimited(String),

    /// Non-success status that is not a rate limit.
    #[error("Generation API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Request never completed or the response body did not parse.
    #[error("Generation transport error: {0}")]
    Transport(String),

    #[error("Generation configuration error: {0}")]
    Config(String),
}

/// Speech synthesis failures. Always non-fatal to the assist flow: callers
/// log a warning and keep the textual guidance.
#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The synthesis call returned without writing any audio.
    #[error("Speech synthesis produced no audio")]
    EmptyAudio,

    #[error("Narration IO error: {0}")]
    Io(#[from] std::io::Error),
}
