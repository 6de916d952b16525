//! Prompt assembly for the generation provider
//!
//! This module provides:
//! - The `GenerationRequest` payload handed to a `GenerationService`
//! - `PromptAssembler`, which folds profile, exemplars, and safety
//!   policy into that payload
//! - Length-budgeted exemplar truncation that never drops a disclaimer

pub mod templates;

use safety_engine::table::RuleHit;
use serde::{Deserialize, Serialize};
use shared_types::PersonaInfo;

use crate::profile::PersonaProfile;
use crate::retrieval::RetrievalResult;

/// Decoding knobs forwarded verbatim to the generation provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.6,
        }
    }
}

/// One exemplar exchange shown to the generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExemplarPair {
    pub scenario_id: String,
    pub patient_message: String,
    pub physician_reply: String,
}

/// Fully assembled generation payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub system_instructions: String,
    pub safety_clauses: Vec<String>,
    pub style_directives: Vec<String>,
    pub exemplars: Vec<ExemplarPair>,
    pub patient_message: String,
    pub sampling: SamplingParams,
}

/// Builds `GenerationRequest`s from retrieval and profiling output
pub struct PromptAssembler {
    max_exemplar_length: usize,
    sampling: SamplingParams,
}

impl PromptAssembler {
    pub fn new(max_exemplar_length: usize, sampling: SamplingParams) -> Self {
        Self {
            max_exemplar_length,
            sampling,
        }
    }

    /// Assemble the first-pass request. Exemplars keep their rank order
    /// and are truncated to the configured length budget.
    pub fn assemble(
        &self,
        patient_message: &str,
        profile: &PersonaProfile,
        exemplars: &RetrievalResult,
        persona: Option<&PersonaInfo>,
        require_disclaimer: bool,
    ) -> GenerationRequest {
        let pairs = exemplars
            .exemplars
            .iter()
            .map(|exemplar| ExemplarPair {
                scenario_id: exemplar.record.id.clone(),
                patient_message: truncate_reply(
                    &exemplar.record.patient_message_text,
                    self.max_exemplar_length,
                ),
                physician_reply: truncate_reply(
                    &exemplar.record.physician_reply_text,
                    self.max_exemplar_length,
                ),
            })
            .collect();

        GenerationRequest {
            system_instructions: templates::PHYSICIAN_SYSTEM_PROMPT.to_string(),
            safety_clauses: templates::SAFETY_POLICY_CLAUSES
                .iter()
                .map(|clause| clause.to_string())
                .collect(),
            style_directives: style_directives(profile, persona, require_disclaimer),
            exemplars: pairs,
            patient_message: patient_message.to_string(),
            sampling: self.sampling.clone(),
        }
    }

    /// Derive the single-retry request from a rejected draft's rule hits
    pub fn assemble_reinforced(
        &self,
        base: &GenerationRequest,
        hits: &[RuleHit],
    ) -> GenerationRequest {
        let mut request = base.clone();
        request.system_instructions = format!(
            "{}\n\n{}",
            templates::REINFORCEMENT_PREFIX,
            base.system_instructions
        );
        request
            .safety_clauses
            .extend(templates::reinforcement_clauses(hits));
        request
    }
}

fn style_directives(
    profile: &PersonaProfile,
    persona: Option<&PersonaInfo>,
    require_disclaimer: bool,
) -> Vec<String> {
    let closing = match persona {
        Some(info) => profile
            .closing_style
            .replace("{physician_name}", &info.display_name),
        None => profile.closing_style.clone(),
    };

    let mut directives = vec![
        format!(
            "Write in a {} tone, matching the physician's usual voice.",
            profile.dominant_tone.as_str()
        ),
        format!("Aim for roughly {} words.", profile.avg_reply_length),
        format!(
            "Open with \"{}\", filling in the patient's name if it is known.",
            profile.greeting_style
        ),
        format!("Sign off with \"{}\".", closing),
    ];
    if require_disclaimer {
        directives.push(format!(
            "This physician routinely includes a medical disclaimer; end the reply \
             with one, for example: \"{}\"",
            templates::DEFAULT_DISCLAIMER
        ));
    }
    directives
}

/// Truncate `text` to at most `max_len` bytes, cutting at a word
/// boundary.
///
/// If the text carries a medical disclaimer sentence that the cut would
/// drop or split, the cut shrinks further to leave room and the whole
/// disclaimer sentence is appended. The length bound wins only when the
/// disclaimer alone does not fit.
pub fn truncate_reply(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    if let Some((start, end)) = safety_engine::patterns::find_disclaimer_sentence(text) {
        let cut = word_cut(text, max_len);
        let sentence_at_risk = end > max_len || (cut > start && cut < end);
        if sentence_at_risk {
            let sentence = text[start..end].trim();
            if sentence.len() + 1 < max_len {
                let budget = max_len - sentence.len() - 1;
                return join_with_sentence(word_truncate(&text[..start], budget), sentence);
            }
            // The bound wins when the sentence alone does not fit
            return word_truncate(text, max_len).to_string();
        }
    }
    word_truncate(text, max_len).to_string()
}

fn join_with_sentence(body: &str, sentence: &str) -> String {
    if body.is_empty() {
        sentence.to_string()
    } else {
        format!("{}\n{}", body, sentence)
    }
}

fn word_truncate(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text.trim_end();
    }
    text[..word_cut(text, max_len)].trim_end()
}

/// Largest cut position not exceeding `max_len` that does not split a
/// word; falls back to a hard character cut when the prefix has no
/// whitespace at all
fn word_cut(text: &str, max_len: usize) -> usize {
    let mut boundary = max_len.min(text.len());
    while !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    if boundary == text.len() {
        return boundary;
    }

    let splits_word = text[..boundary]
        .chars()
        .next_back()
        .map(|ch| !ch.is_whitespace())
        .unwrap_or(false)
        && text[boundary..]
            .chars()
            .next()
            .map(|ch| !ch.is_whitespace())
            .unwrap_or(false);
    if splits_word {
        text[..boundary]
            .rfind(char::is_whitespace)
            .unwrap_or(boundary)
    } else {
        boundary
    }
}
