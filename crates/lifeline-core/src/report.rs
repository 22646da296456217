//! Per-request domain types. Nothing here outlives one request cycle.

use crate::error::ReportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-supplied free-text description of an emergency.
///
/// Constructed through [`EmergencyReport::parse`], which rejects blank and
/// whitespace-only input so the orchestrator never contacts the remote
/// service for an empty report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyReport(String);

impl EmergencyReport {
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        if raw.trim().is_empty() {
            return Err(ReportError::Empty);
        }
        // The text is embedded in the prompt verbatim; no sanitization.
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// AI-generated guidance text, returned unmodified from the model.
///
/// The text is structured informally (immediate actions, numbered steps,
/// warnings, escalation criteria) but no schema is enforced; it is opaque to
/// this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guidance {
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl Guidance {
    pub fn new(text: String) -> Self {
        Self {
            text,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_and_whitespace() {
        assert_eq!(EmergencyReport::parse(""), Err(ReportError::Empty));
        assert_eq!(EmergencyReport::parse("   \n\t "), Err(ReportError::Empty));
    }

    #[test]
    fn parse_keeps_text_verbatim() {
        let report = EmergencyReport::parse("  someone fainted ").unwrap();
        assert_eq!(report.as_str(), "  someone fainted ");
    }
}
