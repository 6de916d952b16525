//! Corpus fixtures shared by the drafting flow tests

use chrono::{TimeZone, Utc};
use docreply_core::{InMemoryCorpus, PersonaInfo, ScenarioRecord};
use shared_types::{PersonaTags, Tone, TopicArea, UrgencyClass};

pub const DR_A: &str = "dr_a";

/// Three replies for `dr_a` on orthogonal four-dimensional embeddings,
/// so each query axis maps to one scenario, plus a decoy record under a
/// second persona that would dominate any query if partitions leaked.
pub fn dr_a_corpus() -> InMemoryCorpus {
    let mut corpus = InMemoryCorpus::new();
    corpus.register_persona(PersonaInfo {
        persona_id: DR_A.to_string(),
        display_name: "Dr. Alice Tan".to_string(),
        specialty: "Internal Medicine".to_string(),
    });

    corpus
        .insert(record(
            "style_a1",
            DR_A,
            "Do I need to worry about muscle aches with my statin?",
            "Dear Maria,\n\nMild muscle aches can happen during the first weeks on a statin \
             and usually settle on their own. Keep taking it as prescribed and let us know \
             if the aches persist past two weeks.\n\nThis message is for general guidance \
             and is not medical advice.\n\nWarm regards,\nDr. Alice Tan",
            vec![1.0, 0.0, 0.0, 0.0],
            Tone::Reassuring,
            TopicArea::Medication,
            10,
        ))
        .unwrap();

    corpus
        .insert(record(
            "style_a2",
            DR_A,
            "Can I move my appointment to next week?",
            "Dear Sam,\n\nOf course. The front desk can move you to Tuesday or Thursday \
             next week; call us or use the portal and we will set it up.\n\nWarm regards,\n\
             Dr. Alice Tan",
            vec![0.0, 1.0, 0.0, 0.0],
            Tone::Friendly,
            TopicArea::Administrative,
            11,
        ))
        .unwrap();

    corpus
        .insert(record(
            "style_a3",
            DR_A,
            "What should I eat to lower my cholesterol?",
            "Dear Priya,\n\nFocus on oats, beans, fish, and olive oil, and keep red meat \
             to occasional portions. Small consistent changes beat a strict diet you \
             cannot sustain.\n\nTake care,\nDr. Alice Tan",
            vec![0.0, 0.0, 1.0, 0.0],
            Tone::Reassuring,
            TopicArea::Lifestyle,
            12,
        ))
        .unwrap();

    // Decoy under another persona, aligned with the statin query vector
    corpus
        .insert(record(
            "style_b1",
            "dr_b",
            "Should I worry about my cholesterol medication?",
            "Dear Lee,\n\nNo concerns from this end. See you at your review.\n\nBest \
             regards,\nDr. Omar Reyes",
            vec![0.9, 0.3, 0.1, 0.0],
            Tone::Concise,
            TopicArea::Medication,
            13,
        ))
        .unwrap();

    corpus
}

fn record(
    id: &str,
    persona_id: &str,
    patient: &str,
    reply: &str,
    embedding: Vec<f32>,
    tone: Tone,
    topic: TopicArea,
    day: u32,
) -> ScenarioRecord {
    ScenarioRecord {
        id: id.to_string(),
        persona_id: persona_id.to_string(),
        patient_message_text: patient.to_string(),
        physician_reply_text: reply.to_string(),
        embedding_vector: embedding,
        persona_tags: PersonaTags {
            tone,
            urgency_class: UrgencyClass::Routine,
            topic,
        },
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
    }
}
