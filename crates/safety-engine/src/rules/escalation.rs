//! Escalation rules. Generation still runs, but the draft is flagged for
//! physician review before anything is sent.

use shared_types::ScenarioClass;

use crate::patterns::{
    DOSE_REQUEST_KEYWORDS, DRUG_KEYWORDS, SIDE_EFFECT_KEYWORDS, URGENCY_KEYWORDS,
};
use crate::table::{RuleMatcher, SafetyRule};

pub fn rules() -> Vec<SafetyRule> {
    vec![
        SafetyRule {
            id: "pre.medication_side_effect",
            classification: ScenarioClass::Escalate,
            matcher: RuleMatcher::KeywordCluster {
                groups: &[DRUG_KEYWORDS, SIDE_EFFECT_KEYWORDS],
                min_groups: 2,
            },
            guidance: "Possible medication reaction. Flagged for physician review before \
                       sending.",
        },
        SafetyRule {
            id: "pre.dosage_change_request",
            classification: ScenarioClass::Escalate,
            matcher: RuleMatcher::KeywordCluster {
                groups: &[DOSE_REQUEST_KEYWORDS, DRUG_KEYWORDS],
                min_groups: 2,
            },
            guidance: "Dosage changes require direct physician authorization.",
        },
        SafetyRule {
            id: "pre.urgent_language",
            classification: ScenarioClass::Escalate,
            matcher: RuleMatcher::AnyKeyword(URGENCY_KEYWORDS),
            guidance: "Flagged for prompt physician review.",
        },
    ]
}
