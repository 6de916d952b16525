//! Data-driven rule table shared by the pre- and post-generation gates.
//!
//! Rules are plain data: an id, a severity classification, a matcher
//! variant, and guidance text. The gates iterate the table in order, so
//! verdict reasons come out deterministic for identical input.

use regex::Regex;
use shared_types::ScenarioClass;

use crate::patterns::{contains_disclaimer, first_keyword_hit, matched_group_count};
use crate::rules;

/// Bumped whenever the shipped rule set changes meaning
pub const TABLE_VERSION: u32 = 1;

/// How a rule decides whether it fires
pub enum RuleMatcher {
    /// Any single keyword or phrase from the list
    AnyKeyword(&'static [&'static str]),
    /// Hits in at least `min_groups` distinct keyword groups
    KeywordCluster {
        groups: &'static [&'static [&'static str]],
        min_groups: usize,
    },
    /// Regex match anywhere in the text
    Pattern(&'static Regex),
    /// Post stage only: fires when a disclaimer is required but absent
    MissingDisclaimer,
}

/// Evidence for a fired rule, used for logging and refusal composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub rule_id: &'static str,
    pub classification: ScenarioClass,
    pub guidance: &'static str,
    /// Matched keyword or pattern text; absent for absence-style matchers
    pub term: Option<String>,
}

pub struct SafetyRule {
    pub id: &'static str,
    pub classification: ScenarioClass,
    pub matcher: RuleMatcher,
    pub guidance: &'static str,
}

impl SafetyRule {
    /// Evaluate this rule against `text`. `disclaimer_required` carries the
    /// post-gate context; pre-gate callers pass false.
    pub fn evaluate(&self, text: &str, disclaimer_required: bool) -> Option<RuleHit> {
        let term = match &self.matcher {
            RuleMatcher::AnyKeyword(keywords) => {
                Some(first_keyword_hit(text, keywords)?.to_string())
            }
            RuleMatcher::KeywordCluster { groups, min_groups } => {
                if matched_group_count(text, groups) < *min_groups {
                    return None;
                }
                groups
                    .iter()
                    .find_map(|group| first_keyword_hit(text, group))
                    .map(|kw| kw.to_string())
            }
            RuleMatcher::Pattern(regex) => {
                Some(regex.find(text)?.as_str().to_string())
            }
            RuleMatcher::MissingDisclaimer => {
                if !disclaimer_required || contains_disclaimer(text) {
                    return None;
                }
                None
            }
        };

        Some(RuleHit {
            rule_id: self.id,
            classification: self.classification,
            guidance: self.guidance,
            term,
        })
    }
}

/// Versioned rule table, loaded once at engine construction
pub struct RuleTable {
    version: u32,
    pre: Vec<SafetyRule>,
    post: Vec<SafetyRule>,
}

impl RuleTable {
    /// The shipped rule set
    pub fn v1() -> Self {
        Self {
            version: TABLE_VERSION,
            pre: rules::pre_rules(),
            post: rules::post_rules(),
        }
    }

    /// Build a table from explicit rule lists (tests and rule experiments)
    pub fn with_rules(version: u32, pre: Vec<SafetyRule>, post: Vec<SafetyRule>) -> Self {
        Self { version, pre, post }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn pre_rules(&self) -> &[SafetyRule] {
        &self.pre
    }

    pub fn post_rules(&self) -> &[SafetyRule] {
        &self.post
    }

    /// Look up a rule by id across both stages
    pub fn rule(&self, id: &str) -> Option<&SafetyRule> {
        self.pre
            .iter()
            .chain(self.post.iter())
            .find(|rule| rule.id == id)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::v1()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_ids_are_unique() {
        let table = RuleTable::v1();
        let mut seen = HashSet::new();
        for rule in table.pre_rules().iter().chain(table.post_rules()) {
            assert!(seen.insert(rule.id), "duplicate rule id: {}", rule.id);
        }
    }

    #[test]
    fn test_pre_rule_ids_use_pre_prefix() {
        let table = RuleTable::v1();
        for rule in table.pre_rules() {
            assert!(rule.id.starts_with("pre."), "bad pre rule id: {}", rule.id);
        }
        for rule in table.post_rules() {
            assert!(rule.id.starts_with("post."), "bad post rule id: {}", rule.id);
        }
    }

    #[test]
    fn test_every_rule_carries_guidance() {
        let table = RuleTable::v1();
        for rule in table.pre_rules().iter().chain(table.post_rules()) {
            assert!(!rule.guidance.is_empty(), "rule {} missing guidance", rule.id);
        }
    }

    #[test]
    fn test_rule_lookup_by_id() {
        let table = RuleTable::v1();
        assert!(table.rule("pre.self_harm").is_some());
        assert!(table.rule("post.missing_disclaimer").is_some());
        assert!(table.rule("pre.nonexistent").is_none());
    }

    #[test]
    fn test_any_keyword_reports_matched_term() {
        let rule = SafetyRule {
            id: "pre.test_rule",
            classification: ScenarioClass::Escalate,
            matcher: RuleMatcher::AnyKeyword(&["urgent", "right away"]),
            guidance: "test",
        };
        let hit = rule.evaluate("Please call me right away", false).unwrap();
        assert_eq!(hit.term.as_deref(), Some("right away"));
        assert!(rule.evaluate("no rush at all", false).is_none());
    }

    #[test]
    fn test_missing_disclaimer_only_fires_when_required() {
        let rule = SafetyRule {
            id: "post.test_disclaimer",
            classification: ScenarioClass::Blocked,
            matcher: RuleMatcher::MissingDisclaimer,
            guidance: "test",
        };
        let bare = "Take care and see you soon.";
        assert!(rule.evaluate(bare, false).is_none());
        assert!(rule.evaluate(bare, true).is_some());

        let with_disclaimer = "Take care. This is not medical advice.";
        assert!(rule.evaluate(with_disclaimer, true).is_none());
    }
}
