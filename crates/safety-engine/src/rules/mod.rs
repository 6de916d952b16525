//! Rule definitions grouped by concern. Each module contributes plain
//! `SafetyRule` data; ordering here fixes the order of verdict reasons.

pub mod emergency;
pub mod escalation;
pub mod output;
pub mod self_harm;

use crate::table::SafetyRule;

/// Pre-generation rules, scanned against the patient message
pub fn pre_rules() -> Vec<SafetyRule> {
    let mut rules = Vec::new();
    rules.extend(emergency::rules());
    rules.extend(self_harm::rules());
    rules.extend(escalation::rules());
    rules
}

/// Post-generation rules, scanned against the generated draft
pub fn post_rules() -> Vec<SafetyRule> {
    output::rules()
}
