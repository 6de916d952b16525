use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::PersonaTags;

/// One indexed patient-email / physician-reply exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    pub id: String,
    pub persona_id: String,
    pub patient_message_text: String,
    pub physician_reply_text: String,
    pub embedding_vector: Vec<f32>, // embedding of patient_message_text
    pub persona_tags: PersonaTags,
    pub created_at: DateTime<Utc>,
}

impl ScenarioRecord {
    /// Embedding dimension of this record
    pub fn dimension(&self) -> usize {
        self.embedding_vector.len()
    }
}
