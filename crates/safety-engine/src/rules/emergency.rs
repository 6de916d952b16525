//! Emergency symptom rules. A hit classifies the scenario out of scope for
//! email entirely; the patient is redirected to 911/ER instead of a draft.

use shared_types::ScenarioClass;

use crate::patterns::{
    ACUTE_EMERGENCY_KEYWORDS, BREATHING_KEYWORDS, CARDIAC_KEYWORDS, INGESTION_KEYWORDS,
    STROKE_KEYWORDS, TOXIC_SUBSTANCE_KEYWORDS,
};
use crate::table::{RuleMatcher, SafetyRule};

pub fn rules() -> Vec<SafetyRule> {
    vec![
        SafetyRule {
            id: "pre.cardiac_emergency",
            classification: ScenarioClass::OutOfScope,
            matcher: RuleMatcher::AnyKeyword(CARDIAC_KEYWORDS),
            guidance: "Chest pain can signal a heart attack. Call 911 or go to the nearest \
                       emergency room now.",
        },
        SafetyRule {
            id: "pre.stroke_signs",
            classification: ScenarioClass::OutOfScope,
            matcher: RuleMatcher::AnyKeyword(STROKE_KEYWORDS),
            guidance: "These can be signs of a stroke. Call 911 immediately.",
        },
        SafetyRule {
            id: "pre.breathing_difficulty",
            classification: ScenarioClass::OutOfScope,
            matcher: RuleMatcher::AnyKeyword(BREATHING_KEYWORDS),
            guidance: "Difficulty breathing needs emergency care. Call 911 now.",
        },
        SafetyRule {
            id: "pre.poisoning",
            classification: ScenarioClass::OutOfScope,
            matcher: RuleMatcher::KeywordCluster {
                groups: &[INGESTION_KEYWORDS, TOXIC_SUBSTANCE_KEYWORDS],
                min_groups: 2,
            },
            guidance: "Call Poison Control at 1-800-222-1222 or 911 right away.",
        },
        SafetyRule {
            id: "pre.acute_emergency",
            classification: ScenarioClass::OutOfScope,
            matcher: RuleMatcher::AnyKeyword(ACUTE_EMERGENCY_KEYWORDS),
            guidance: "These symptoms need immediate in-person emergency care. Call 911 or go \
                       to the nearest emergency room.",
        },
    ]
}
