//! Top-k exemplar retrieval for one persona partition

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::DraftError;
use crate::providers::EmbeddingService;
use crate::record::ScenarioRecord;
use crate::retrieval::diversity::select_diverse;
use crate::retrieval::similarity::cosine_similarity;
use crate::retrieval::{RankedExemplar, RetrievalResult};
use crate::store::CorpusStore;

/// Knobs the retriever needs beyond per-request options
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalConfig {
    pub duplicate_threshold: f32,
    pub embed_timeout: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            duplicate_threshold: config.duplicate_threshold,
            embed_timeout: config.embed_timeout,
        }
    }
}

impl From<&EngineConfig> for RetrievalConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            duplicate_threshold: config.duplicate_threshold,
            embed_timeout: config.embed_timeout,
        }
    }
}

/// Score, filter, order, and de-duplicate a partition against a query
/// embedding. Pure and deterministic: the same inputs always produce
/// the same exemplar list regardless of input order.
///
/// Ordering is similarity descending, then `created_at` descending
/// (newer style wins a tie), then id ascending.
pub fn rank_partition(
    records: &[Arc<ScenarioRecord>],
    query_embedding: &[f32],
    k: usize,
    min_similarity: f32,
    duplicate_threshold: f32,
) -> Vec<RankedExemplar> {
    let mut scored: Vec<(Arc<ScenarioRecord>, f32)> = records
        .iter()
        .map(|record| {
            let score = cosine_similarity(query_embedding, &record.embedding_vector);
            (record.clone(), score)
        })
        .collect();

    scored.retain(|(_, score)| *score >= min_similarity);

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.created_at.cmp(&a.0.created_at))
            .then_with(|| a.0.id.cmp(&b.0.id))
    });

    select_diverse(scored, k, duplicate_threshold)
        .into_iter()
        .enumerate()
        .map(|(index, (record, similarity))| RankedExemplar {
            record,
            similarity,
            rank: index + 1,
        })
        .collect()
}

/// Async retrieval front end: embeds the query, then ranks the persona
/// partition with `rank_partition`
pub struct Retriever {
    store: Arc<dyn CorpusStore>,
    embedder: Arc<dyn EmbeddingService>,
    config: RetrievalConfig,
}

impl Retriever {
    pub fn new(
        store: Arc<dyn CorpusStore>,
        embedder: Arc<dyn EmbeddingService>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Retrieve up to `k` exemplars for `persona_id`.
    ///
    /// The partition is checked before the embedding call, so an unknown
    /// persona never costs an upstream round trip.
    pub async fn retrieve(
        &self,
        query_text: &str,
        persona_id: &str,
        k: usize,
        min_similarity: f32,
    ) -> Result<RetrievalResult, DraftError> {
        if k == 0 {
            return Err(DraftError::InvalidRequest(
                "k must be at least 1".to_string(),
            ));
        }

        let records = self.store.query_partition(persona_id);
        if records.is_empty() {
            return Err(DraftError::PersonaNotFound {
                persona_id: persona_id.to_string(),
            });
        }

        let query_embedding =
            tokio::time::timeout(self.config.embed_timeout, self.embedder.embed(query_text))
                .await
                .map_err(|_| DraftError::UpstreamTimeout {
                    operation: "embed",
                    elapsed: self.config.embed_timeout,
                })?
                .map_err(DraftError::Embedding)?;

        let dimension = records[0].dimension();
        if query_embedding.len() != dimension {
            return Err(DraftError::Embedding(anyhow::anyhow!(
                "query embedding dimension {} does not match corpus dimension {}",
                query_embedding.len(),
                dimension
            )));
        }

        let exemplars = rank_partition(
            &records,
            &query_embedding,
            k,
            min_similarity,
            self.config.duplicate_threshold,
        );
        debug!(
            "Retrieved {} of {} records for persona {} (k={}, min_similarity={})",
            exemplars.len(),
            records.len(),
            persona_id,
            k,
            min_similarity
        );

        Ok(RetrievalResult { exemplars })
    }
}
