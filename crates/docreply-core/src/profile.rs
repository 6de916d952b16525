//! Persona style profiling over retrieved exemplars
//!
//! The profile is computed fresh from each retrieval result rather than
//! cached per persona, so it always reflects the exemplars the draft
//! will actually imitate.

use std::collections::HashMap;
use std::hash::Hash;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared_types::Tone;

use crate::error::DraftError;
use crate::retrieval::RetrievalResult;

lazy_static! {
    static ref GREETING_PATTERN: Regex = Regex::new(
        r"(?i)^\s*(dear|hello|hi|hey|good morning|good afternoon|good evening|greetings)\b[^,\n]*[,:]?\s*$"
    )
    .expect("greeting pattern must compile");
    static ref CLOSING_PATTERN: Regex = Regex::new(
        r"(?i)^\s*(best regards|warm regards|kind regards|warmest regards|best wishes|all the best|take care|sincerely|warmly|cordially|in good health|regards|best)\s*[,.!]?\s*$"
    )
    .expect("closing pattern must compile");
}

const DEFAULT_GREETING: &str = "Dear {patient_name},";
const DEFAULT_CLOSING: &str = "Best regards,\n{physician_name}";

// Closing phrases usually sit within the last few lines of a reply
const CLOSING_SCAN_LINES: usize = 4;

/// Aggregated style snapshot of one persona's retrieved exemplars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaProfile {
    pub dominant_tone: Tone,
    /// Mean reply length in words, rounded to the nearest whole word
    pub avg_reply_length: usize,
    /// Fraction of exemplar replies carrying a medical disclaimer
    pub disclaimer_rate: f32,
    /// Greeting template with a `{patient_name}` placeholder
    pub greeting_style: String,
    /// Closing template with a `{physician_name}` placeholder
    pub closing_style: String,
    pub sample_count: usize,
}

/// Computes `PersonaProfile`s; stateless
pub struct PersonaProfiler;

impl PersonaProfiler {
    /// Derive a style profile from a non-empty retrieval result.
    ///
    /// Votes are tallied in rank order, so any tie falls to the
    /// highest-similarity exemplar that carries a tied value.
    pub fn profile(results: &RetrievalResult) -> Result<PersonaProfile, DraftError> {
        if results.is_empty() {
            return Err(DraftError::InsufficientData);
        }

        let replies: Vec<&str> = results
            .exemplars
            .iter()
            .map(|exemplar| exemplar.record.physician_reply_text.as_str())
            .collect();

        let tones: Vec<Tone> = results
            .exemplars
            .iter()
            .map(|exemplar| exemplar.record.persona_tags.tone)
            .collect();
        let dominant_tone =
            majority_vote(&tones).expect("non-empty exemplar list always has a tone");

        let total_words: usize = replies
            .iter()
            .map(|reply| reply.split_whitespace().count())
            .sum();
        let avg_reply_length =
            (total_words as f64 / replies.len() as f64).round() as usize;

        let with_disclaimer = replies
            .iter()
            .filter(|reply| safety_engine::patterns::contains_disclaimer(reply))
            .count();
        let disclaimer_rate = with_disclaimer as f32 / replies.len() as f32;

        let salutations: Vec<String> = replies
            .iter()
            .filter_map(|reply| extract_salutation(reply))
            .collect();
        let greeting_style = majority_vote(&salutations)
            .map(|salutation| format!("{} {{patient_name}},", salutation))
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());

        let closings: Vec<String> = replies
            .iter()
            .filter_map(|reply| extract_closing(reply))
            .collect();
        let closing_style = majority_vote(&closings)
            .map(|closing| format!("{},\n{{physician_name}}", closing))
            .unwrap_or_else(|| DEFAULT_CLOSING.to_string());

        Ok(PersonaProfile {
            dominant_tone,
            avg_reply_length,
            disclaimer_rate,
            greeting_style,
            closing_style,
            sample_count: replies.len(),
        })
    }
}

/// Most frequent item; ties fall to the earliest item holding the
/// winning count
fn majority_vote<T: Eq + Hash + Clone>(items: &[T]) -> Option<T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let best = counts.values().copied().max()?;
    items.iter().find(|item| counts[*item] == best).cloned()
}

fn extract_salutation(reply: &str) -> Option<String> {
    let first_line = reply.lines().map(str::trim).find(|line| !line.is_empty())?;
    GREETING_PATTERN
        .captures(first_line)
        .map(|captures| captures[1].to_string())
}

fn extract_closing(reply: &str) -> Option<String> {
    reply
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(CLOSING_SCAN_LINES)
        .find_map(|line| {
            CLOSING_PATTERN
                .captures(line)
                .map(|captures| captures[1].to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use shared_types::{PersonaTags, TopicArea, UrgencyClass};
    use std::sync::Arc;

    use crate::record::ScenarioRecord;
    use crate::retrieval::RankedExemplar;

    fn make_results(entries: &[(Tone, &str)]) -> RetrievalResult {
        let exemplars = entries
            .iter()
            .enumerate()
            .map(|(index, (tone, reply))| RankedExemplar {
                record: Arc::new(ScenarioRecord {
                    id: format!("style_{}", index),
                    persona_id: "dr_a".to_string(),
                    patient_message_text: String::new(),
                    physician_reply_text: reply.to_string(),
                    embedding_vector: vec![1.0],
                    persona_tags: PersonaTags {
                        tone: *tone,
                        urgency_class: UrgencyClass::Routine,
                        topic: TopicArea::Medication,
                    },
                    created_at: Utc::now(),
                }),
                similarity: 0.9 - 0.1 * index as f32,
                rank: index + 1,
            })
            .collect();
        RetrievalResult { exemplars }
    }

    #[test]
    fn test_empty_results_are_insufficient() {
        let results = RetrievalResult::default();
        assert!(matches!(
            PersonaProfiler::profile(&results),
            Err(DraftError::InsufficientData)
        ));
    }

    #[test]
    fn test_majority_tone_wins() {
        let results = make_results(&[
            (Tone::Reassuring, "Take it easy and rest."),
            (Tone::Formal, "Please schedule a consultation."),
            (Tone::Reassuring, "No cause for alarm here."),
        ]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.dominant_tone, Tone::Reassuring);
        assert_eq!(profile.sample_count, 3);
    }

    #[test]
    fn test_tone_tie_falls_to_highest_similarity() {
        let results = make_results(&[
            (Tone::Friendly, "Happy to help!"),
            (Tone::Formal, "Please find the details below."),
        ]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.dominant_tone, Tone::Friendly);
    }

    #[test]
    fn test_average_length_rounds_to_nearest() {
        // 4 words and 5 words average to 4.5, rounding to 5
        let results = make_results(&[
            (Tone::Concise, "Rest and hydrate today."),
            (Tone::Concise, "Call us if anything changes."),
        ]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.avg_reply_length, 5);
    }

    #[test]
    fn test_disclaimer_rate_counts_marked_replies() {
        let results = make_results(&[
            (
                Tone::Reassuring,
                "Rest up. This is not medical advice; call us if symptoms persist.",
            ),
            (Tone::Reassuring, "See you at your next visit."),
        ]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.disclaimer_rate, 0.5);
    }

    #[test]
    fn test_greeting_and_closing_extraction() {
        let reply_a = "Dear Maria,\n\nYour results look stable.\n\nWarm regards,\nDr. Chen";
        let reply_b = "Dear Tom,\n\nKeep taking the current dose.\n\nWarm regards,\nDr. Chen";
        let reply_c = "Hello Priya,\n\nLet us recheck in two weeks.\n\nBest,\nDr. Chen";
        let results = make_results(&[
            (Tone::Reassuring, reply_a),
            (Tone::Reassuring, reply_b),
            (Tone::Reassuring, reply_c),
        ]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.greeting_style, "Dear {patient_name},");
        assert_eq!(profile.closing_style, "Warm regards,\n{physician_name}");
    }

    #[test]
    fn test_defaults_when_no_structure_found() {
        let results = make_results(&[(
            Tone::Concise,
            "Yes, that refill has been sent to your pharmacy.",
        )]);

        let profile = PersonaProfiler::profile(&results).unwrap();
        assert_eq!(profile.greeting_style, DEFAULT_GREETING);
        assert_eq!(profile.closing_style, DEFAULT_CLOSING);
    }

    #[test]
    fn test_majority_vote_prefers_earliest_on_tie() {
        assert_eq!(majority_vote(&["x", "y", "y", "x"]), Some("x"));
        assert_eq!(majority_vote(&["y", "x", "x"]), Some("x"));
        assert_eq!(majority_vote::<&str>(&[]), None);
    }
}
