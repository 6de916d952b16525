//! Self-harm indicators. Blocked outright: the reply is a crisis-resource
//! message composed by a human-reviewed template, never a generated draft.

use shared_types::ScenarioClass;

use crate::patterns::SELF_HARM_KEYWORDS;
use crate::table::{RuleMatcher, SafetyRule};

pub fn rules() -> Vec<SafetyRule> {
    vec![SafetyRule {
        id: "pre.self_harm",
        classification: ScenarioClass::Blocked,
        matcher: RuleMatcher::AnyKeyword(SELF_HARM_KEYWORDS),
        guidance: "If you are having thoughts of harming yourself, call or text 988 (Suicide \
                   & Crisis Lifeline) now, or call 911 if you are in immediate danger.",
    }]
}
