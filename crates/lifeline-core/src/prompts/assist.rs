//! Emergency-assist prompt: turn a raw report into structured guidance.
//!
//! The report text is embedded verbatim. The template asks for every section
//! the UI renders: immediate actions, numbered steps, warnings, escalation.

/// System instruction for the guidance model.
pub const ASSIST_SYSTEM: &str = "You are an expert Emergency Response Assistant. \
Your guidance is read by untrained bystanders under stress. \
Keep your response short, clear, and focused on saving lives until professionals arrive.";

/// User prompt template: placeholder is replaced with the actual report.
pub const ASSIST_USER_TEMPLATE: &str = r#"Someone reported the following emergency: '{report}'

Please provide:
- Immediate actions to be taken
- Step-by-step instructions in simple language, numbered
- Warnings or precautions if needed
- When to escalate to professional emergency services

Keep your response short, clear, and focused on saving lives."#;

/// Build the user prompt with the given report text.
pub fn assist_user_prompt(report: &str) -> String {
    ASSIST_USER_TEMPLATE.replace("{report}", report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_embedded_verbatim() {
        let prompt = assist_user_prompt("house fire in kitchen");
        assert!(prompt.contains("'house fire in kitchen'"));
        assert!(!prompt.contains("{report}"));
    }
}
