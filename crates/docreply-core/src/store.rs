//! In-memory corpus store partitioned by persona
//!
//! Records are loaded once at startup (typically from a JSONL corpus
//! file) and read-only afterwards; the drafting path never mutates the
//! store.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared_types::{PersonaInfo, PersonaTags, Tone, TopicArea, UrgencyClass};

use crate::providers::EmbeddingService;
use crate::record::ScenarioRecord;

/// Read-only view of the corpus used by the retrieval path
pub trait CorpusStore: Send + Sync {
    /// All records indexed under a persona; empty when the persona is unknown
    fn query_partition(&self, persona_id: &str) -> Vec<Arc<ScenarioRecord>>;

    /// Display metadata for a persona, when registered
    fn persona_info(&self, persona_id: &str) -> Option<PersonaInfo>;

    /// Sorted list of persona ids with at least one record
    fn persona_ids(&self) -> Vec<String>;

    /// Total record count across all partitions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Corpus held in process memory, keyed by persona id
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    partitions: HashMap<String, Vec<Arc<ScenarioRecord>>>,
    personas: HashMap<String, PersonaInfo>,
    ids: HashSet<String>,
    dimension: Option<usize>,
}

/// One line of the JSONL corpus file
#[derive(Debug, Deserialize)]
struct RawScenarioLine {
    #[serde(default)]
    id: Option<String>,
    persona_id: String,
    physician_persona: RawPersona,
    medical_scenario: RawScenario,
    patient_email: String,
    physician_reply: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct RawPersona {
    name: String,
    specialty: String,
    tone: String,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    topic: String,
    #[serde(default)]
    urgency: Option<String>,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a corpus from a JSONL file, embedding any line that does not
    /// carry a precomputed vector.
    ///
    /// Lines without an `id` are assigned `style_{n}` where n is the
    /// number of records ingested before them. Any malformed line aborts
    /// the load with its line number in the error chain.
    pub async fn ingest_jsonl(path: &Path, embedder: &dyn EmbeddingService) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading corpus file {}", path.display()))?;

        let mut corpus = Self::new();
        for (index, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed: RawScenarioLine = serde_json::from_str(line)
                .with_context(|| format!("parsing corpus line {}", index + 1))?;
            let record = corpus
                .record_from_raw(parsed, embedder)
                .await
                .with_context(|| format!("ingesting corpus line {}", index + 1))?;
            corpus
                .insert(record)
                .with_context(|| format!("ingesting corpus line {}", index + 1))?;
        }

        tracing::info!(
            "Ingested {} records across {} personas from {}",
            corpus.len(),
            corpus.partitions.len(),
            path.display()
        );
        Ok(corpus)
    }

    async fn record_from_raw(
        &mut self,
        raw: RawScenarioLine,
        embedder: &dyn EmbeddingService,
    ) -> Result<ScenarioRecord> {
        let RawScenarioLine {
            id,
            persona_id,
            physician_persona,
            medical_scenario,
            patient_email,
            physician_reply,
            created_at,
            embedding,
        } = raw;

        let tone: Tone = physician_persona.tone.parse()?;
        let topic: TopicArea = medical_scenario.topic.parse()?;
        let urgency_class: UrgencyClass = match medical_scenario.urgency {
            Some(label) => label.parse()?,
            None => UrgencyClass::Routine,
        };

        // First line for a persona wins the display metadata
        if !self.personas.contains_key(&persona_id) {
            self.personas.insert(
                persona_id.clone(),
                PersonaInfo {
                    persona_id: persona_id.clone(),
                    display_name: physician_persona.name,
                    specialty: physician_persona.specialty,
                },
            );
        }

        let embedding_vector = match embedding {
            Some(vector) => vector,
            None => embedder
                .embed(&patient_email)
                .await
                .context("embedding patient message")?,
        };

        Ok(ScenarioRecord {
            id: id.unwrap_or_else(|| format!("style_{}", self.ids.len())),
            persona_id,
            patient_message_text: patient_email,
            physician_reply_text: physician_reply,
            embedding_vector,
            persona_tags: PersonaTags {
                tone,
                urgency_class,
                topic,
            },
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }

    /// Add a single record, enforcing id uniqueness and a consistent
    /// embedding dimension across the whole corpus
    pub fn insert(&mut self, record: ScenarioRecord) -> Result<()> {
        if record.id.is_empty() {
            bail!("record id must not be empty");
        }
        if record.persona_id.is_empty() {
            bail!("record '{}' has an empty persona_id", record.id);
        }
        if record.embedding_vector.is_empty() {
            bail!("record '{}' has an empty embedding", record.id);
        }
        if self.ids.contains(&record.id) {
            bail!("duplicate record id '{}'", record.id);
        }
        match self.dimension {
            Some(dimension) if record.embedding_vector.len() != dimension => {
                bail!(
                    "record '{}' has embedding dimension {} but the corpus uses {}",
                    record.id,
                    record.embedding_vector.len(),
                    dimension
                );
            }
            Some(_) => {}
            None => self.dimension = Some(record.embedding_vector.len()),
        }

        self.ids.insert(record.id.clone());
        self.partitions
            .entry(record.persona_id.clone())
            .or_default()
            .push(Arc::new(record));
        Ok(())
    }

    /// Bulk insert; returns the number of records added
    pub fn ingest_records<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = ScenarioRecord>,
    {
        let mut count = 0;
        for record in records {
            self.insert(record)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn register_persona(&mut self, info: PersonaInfo) {
        self.personas.insert(info.persona_id.clone(), info);
    }

    /// Embedding dimension established by the first inserted record
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

impl CorpusStore for InMemoryCorpus {
    fn query_partition(&self, persona_id: &str) -> Vec<Arc<ScenarioRecord>> {
        self.partitions.get(persona_id).cloned().unwrap_or_default()
    }

    fn persona_info(&self, persona_id: &str) -> Option<PersonaInfo> {
        self.personas.get(persona_id).cloned()
    }

    fn persona_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.partitions.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
