//! Static reference content: the universal first-aid checklist shown on every
//! degraded outcome, and emergency phone numbers by region for the page panel.

use serde::Serialize;

/// Universal first-aid checklist, shown whenever live guidance is
/// unavailable. Intentionally generic: it must be safe advice for any
/// emergency the user might have described.
pub const FIRST_AID_CHECKLIST: &str = "\
Universal first-aid checklist:
1. Check the scene is safe before approaching.
2. Call your local emergency number immediately.
3. Check responsiveness: tap the shoulders and shout.
4. If not breathing, start chest compressions (100-120 per minute).
5. For severe bleeding, press firmly on the wound with clean cloth.
6. For burns, cool with running water for 20 minutes; no ice, no ointments.
7. If unconscious but breathing, place in the recovery position.
8. Do not move anyone with a suspected head, neck, or back injury.
9. Keep the person warm and stay with them until help arrives.";

/// One row of the emergency-numbers panel.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyNumber {
    pub region: &'static str,
    pub number: &'static str,
    pub service: &'static str,
}

/// Emergency phone numbers by region, rendered by the gateway's reference
/// panel and returned by `/api/v1/reference`.
pub const EMERGENCY_NUMBERS: &[EmergencyNumber] = &[
    EmergencyNumber { region: "United States / Canada", number: "911", service: "All emergencies" },
    EmergencyNumber { region: "European Union", number: "112", service: "All emergencies" },
    EmergencyNumber { region: "United Kingdom", number: "999", service: "All emergencies" },
    EmergencyNumber { region: "Australia", number: "000", service: "All emergencies" },
    EmergencyNumber { region: "New Zealand", number: "111", service: "All emergencies" },
    EmergencyNumber { region: "India", number: "112", service: "All emergencies" },
    EmergencyNumber { region: "India", number: "108", service: "Ambulance" },
    EmergencyNumber { region: "Japan", number: "119", service: "Fire / Ambulance" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_is_non_empty_and_universal() {
        assert!(!FIRST_AID_CHECKLIST.trim().is_empty());
        assert!(FIRST_AID_CHECKLIST.contains("emergency number"));
    }

    #[test]
    fn numbers_table_serializes() {
        let json = serde_json::to_string(EMERGENCY_NUMBERS).unwrap();
        assert!(json.contains("911"));
        assert!(json.contains("112"));
    }
}
