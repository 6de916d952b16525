//! Post-generation rules scanned against the draft itself. Any hit blocks
//! the draft and triggers the single reinforced regeneration.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::ScenarioClass;

use crate::patterns::CONDITION_TERMS;
use crate::table::{RuleMatcher, SafetyRule};

lazy_static! {
    /// Assertive diagnosis phrasing ("you have a sinus infection").
    /// Hedged forms ("your symptoms are consistent with...") stay allowed.
    /// Up to two modifier words may sit between article and condition so
    /// "a sinus infection" and "a mild viral infection" still match.
    static ref DIAGNOSTIC_ASSERTION_PATTERN: Regex = Regex::new(&format!(
        r"(?i)\b(?:you\s+(?:definitely\s+|certainly\s+|clearly\s+|probably\s+|likely\s+)?(?:have|are\s+suffering\s+from|are\s+experiencing)\s+(?:a\s+|an\s+|the\s+)?(?:\w+\s+){{0,2}}(?:{})\b|(?:the|my)\s+diagnosis\s+is\b|this\s+is\s+definitely\s+(?:a|an)\b)",
        CONDITION_TERMS.join("|")
    ))
    .unwrap();

    /// Explicit dosage amounts or tablet-count instructions
    static ref DOSAGE_CLAIM_PATTERN: Regex = Regex::new(
        r"(?i)(?:\b\d+(?:\.\d+)?\s*(?:mg|mcg|milligrams?|micrograms?|units?|ml)\b|\btake\s+\d+\s+(?:tablets?|pills?|capsules?)\b)"
    )
    .unwrap();
}

pub fn rules() -> Vec<SafetyRule> {
    vec![
        SafetyRule {
            id: "post.diagnostic_assertion",
            classification: ScenarioClass::Blocked,
            matcher: RuleMatcher::Pattern(&DIAGNOSTIC_ASSERTION_PATTERN),
            guidance: "Remove diagnostic assertions. Use 'your symptoms are consistent with' \
                       phrasing instead.",
        },
        SafetyRule {
            id: "post.dosage_claim",
            classification: ScenarioClass::Blocked,
            matcher: RuleMatcher::Pattern(&DOSAGE_CLAIM_PATTERN),
            guidance: "Remove explicit dosage amounts. Direct the patient to their \
                       prescription label or pharmacist instead.",
        },
        SafetyRule {
            id: "post.missing_disclaimer",
            classification: ScenarioClass::Blocked,
            matcher: RuleMatcher::MissingDisclaimer,
            guidance: "Append the practice's standard disclaimer sentence.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(text: &str, disclaimer_required: bool) -> Vec<&'static str> {
        rules()
            .iter()
            .filter_map(|rule| rule.evaluate(text, disclaimer_required))
            .map(|hit| hit.rule_id)
            .collect()
    }

    #[test]
    fn test_blocks_assertive_diagnosis() {
        let ids = hits("Based on what you describe, you have a sinus infection.", false);
        assert_eq!(ids, vec!["post.diagnostic_assertion"]);
    }

    #[test]
    fn test_blocks_suffering_from_phrasing() {
        let ids = hits("It appears you are suffering from pneumonia.", false);
        assert_eq!(ids, vec!["post.diagnostic_assertion"]);
    }

    #[test]
    fn test_allows_consistent_with_phrasing() {
        let ids = hits(
            "Your symptoms are consistent with a viral infection; let's confirm in person.",
            false,
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_condition_match_respects_word_boundary() {
        // "flu" must not fire inside "fluid"
        assert!(hits("You have a fluid intake goal of two liters a day.", false).is_empty());
        assert_eq!(
            hits("You have the flu.", false),
            vec!["post.diagnostic_assertion"]
        );
    }

    #[test]
    fn test_blocks_dosage_amount() {
        let ids = hits("Increase to 40 mg daily and check back in a week.", false);
        assert_eq!(ids, vec!["post.dosage_claim"]);
    }

    #[test]
    fn test_blocks_tablet_count_instruction() {
        let ids = hits("Please take 2 tablets every morning with food.", false);
        assert_eq!(ids, vec!["post.dosage_claim"]);
    }

    #[test]
    fn test_allows_dose_discussion_without_numbers() {
        let ids = hits(
            "Please keep taking your current dose as prescribed until we speak.",
            false,
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_missing_disclaimer_respects_context() {
        let draft = "Rest, fluids, and we'll see you Thursday.";
        assert!(hits(draft, false).is_empty());
        assert_eq!(hits(draft, true), vec!["post.missing_disclaimer"]);

        let with_disclaimer =
            "Rest and fluids. This message is not medical advice; call us if anything changes.";
        assert!(hits(with_disclaimer, true).is_empty());
    }

    #[test]
    fn test_clean_draft_passes_all_rules() {
        let draft = "Thank you for letting us know. Mild soreness is common for a day or two. \
                     If it lasts longer, please schedule a visit. This is not medical advice.";
        assert!(hits(draft, true).is_empty());
    }
}
