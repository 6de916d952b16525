//! Keyword vocabularies and detection helpers for the safety rule table

/// Cardiac emergency phrases. Multi-word on purpose so "heartburn" or a
/// heart-rate question never trips the gate.
pub const CARDIAC_KEYWORDS: &[&str] = &[
    "chest pain",
    "chest pressure",
    "pain in my chest",
    "chest tightness",
    "tightness in my chest",
    "pain radiating",
    "pain spreading to my arm",
    "crushing sensation in my chest",
    "heart attack",
];

/// Stroke warning-sign phrases
pub const STROKE_KEYWORDS: &[&str] = &[
    "slurred speech",
    "speech is slurred",
    "face drooping",
    "face is drooping",
    "drooping on one side",
    "numbness on one side",
    "numb on one side",
    "can't move my arm",
    "cannot move my arm",
    "sudden loss of vision",
    "worst headache of my life",
];

/// Respiratory distress phrases
pub const BREATHING_KEYWORDS: &[&str] = &[
    "can't breathe",
    "cannot breathe",
    "can not breathe",
    "difficulty breathing",
    "struggling to breathe",
    "trouble breathing",
    "gasping for air",
    "lips turning blue",
];

/// Ingestion verbs for poisoning scenarios
pub const INGESTION_KEYWORDS: &[&str] = &["swallowed", "ingested", "drank", "got into"];

/// Toxic substances paired with the ingestion verbs above
pub const TOXIC_SUBSTANCE_KEYWORDS: &[&str] = &[
    "bleach",
    "cleaning product",
    "detergent",
    "chemical",
    "poison",
    "battery",
    "batteries",
    "nail polish remover",
    "antifreeze",
];

/// Other symptoms that always warrant emergency care
pub const ACUTE_EMERGENCY_KEYWORDS: &[&str] = &[
    "overdose",
    "overdosed",
    "took too many pills",
    "took extra pills",
    "vomiting blood",
    "throwing up blood",
    "coughing up blood",
    "passed out",
    "lost consciousness",
    "unconscious",
    "unresponsive",
    "severe abdominal pain",
    "stiff neck and fever",
    "seizure",
];

/// Self-harm indicators
pub const SELF_HARM_KEYWORDS: &[&str] = &[
    "suicidal",
    "suicide",
    "kill myself",
    "end my life",
    "hurt myself",
    "harm myself",
    "harming myself",
    "self-harm",
    "no reason to live",
    "don't want to live",
    "better off without me",
    "ending it all",
];

/// Explicit urgency language
pub const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "right away",
    "immediately",
    "getting worse",
    "severe pain",
    "unbearable",
    "excruciating",
    "can't wait",
];

/// Medication nouns and common drug classes
pub const DRUG_KEYWORDS: &[&str] = &[
    "pill",
    "pills",
    "medication",
    "medicine",
    "tablet",
    "prescription",
    "dose",
    "dosage",
    "statin",
    "antibiotic",
    "beta blocker",
    "blood thinner",
    "insulin",
    "steroid",
    "antidepressant",
    "painkiller",
    "pain medication",
    "opioid",
    "oxycodone",
];

/// Side-effect and adverse-reaction terms
pub const SIDE_EFFECT_KEYWORDS: &[&str] = &[
    "dizzy",
    "dizziness",
    "lightheaded",
    "nausea",
    "nauseous",
    "rash",
    "hives",
    "itchy",
    "swelling",
    "side effect",
    "side effects",
    "reaction",
    "muscle pain",
    "muscle aches",
    "stomach pain",
    "vomiting",
    "headaches since",
];

/// Requests to change or increase a dose
pub const DOSE_REQUEST_KEYWORDS: &[&str] = &[
    "higher dose",
    "higher dosage",
    "stronger dose",
    "increase my dose",
    "increase my dosage",
    "increase the dose",
    "up my dose",
    "more of my",
    "double my",
    "something stronger",
    "refill early",
];

/// Conditions a draft must never assert as a diagnosis
pub const CONDITION_TERMS: &[&str] = &[
    "infection",
    "virus",
    "flu",
    "influenza",
    "pneumonia",
    "bronchitis",
    "strep throat",
    "sinusitis",
    "shingles",
    "appendicitis",
    "meningitis",
    "diabetes",
    "anemia",
    "migraine",
    "covid",
    "uti",
    "urinary tract infection",
    "blood clot",
    "fracture",
    "concussion",
];

/// Boilerplate disclaimer markers tracked per reply
pub const DISCLAIMER_MARKERS: &[&str] = &[
    "not medical advice",
    "not a substitute for professional medical advice",
    "does not replace an in-person",
    "does not constitute medical advice",
    "for informational purposes",
    "please seek immediate medical attention",
    "contact our office or call 911",
];

/// Count how many keyword groups have at least one hit in the text.
/// Cluster rules require hits from multiple groups so a single stray word
/// ("pill" alone, "dizzy" alone) is not enough to fire.
pub fn matched_group_count(text: &str, keyword_groups: &[&[&str]]) -> usize {
    let text_lower = text.to_lowercase();
    keyword_groups
        .iter()
        .filter(|group| group.iter().any(|keyword| text_lower.contains(keyword)))
        .count()
}

/// First keyword from the list found in the text, for match evidence
pub fn first_keyword_hit(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .find(|keyword| text_lower.contains(*keyword))
        .copied()
}

/// Case-insensitive ASCII substring search returning a byte offset that is
/// always a char boundary of the original text.
pub fn find_ascii_ci(text: &str, needle: &str) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Extract a snippet around a keyword match (up to 150 characters)
pub fn extract_snippet(text: &str, keyword: &str) -> String {
    if let Some(pos) = find_ascii_ci(text, keyword) {
        let start = floor_char_boundary(text, pos.saturating_sub(50));
        let end = ceil_char_boundary(text, (pos + keyword.len() + 50).min(text.len()));
        format!("...{}...", text[start..end].trim())
    } else {
        text.chars().take(150).collect::<String>()
    }
}

/// Locate the sentence containing a disclaimer marker.
/// Returns byte offsets spanning the full sentence, terminator included.
pub fn find_disclaimer_sentence(text: &str) -> Option<(usize, usize)> {
    let marker_pos = DISCLAIMER_MARKERS
        .iter()
        .filter_map(|marker| find_ascii_ci(text, marker))
        .min()?;

    let start = text[..marker_pos]
        .rfind(['.', '!', '?', '\n'])
        .map(|p| p + 1)
        .unwrap_or(0);
    let end = text[marker_pos..]
        .find(['.', '!', '?'])
        .map(|p| marker_pos + p + 1)
        .unwrap_or(text.len());

    // Skip leading whitespace so the span starts at the sentence itself
    let trimmed_start = start + text[start..].len() - text[start..].trim_start().len();
    Some((trimmed_start, end))
}

pub fn contains_disclaimer(text: &str) -> bool {
    find_disclaimer_sentence(text).is_some()
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
