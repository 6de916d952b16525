//! Retrieval module - cosine scoring and exemplar selection over persona partitions
//!
//! This module provides:
//! - Cosine similarity scoring against a query embedding
//! - Threshold filtering with deterministic tie-breaking
//! - Near-duplicate suppression so exemplars stay diverse
//! - The async `Retriever` that wires the above to a store and embedder

pub mod diversity;
pub mod retriever;
pub mod similarity;

pub use diversity::select_diverse;
pub use retriever::{rank_partition, RetrievalConfig, Retriever};
pub use similarity::cosine_similarity;

use std::sync::Arc;

use crate::record::ScenarioRecord;

/// One retrieved exemplar with its score and 1-based rank
#[derive(Debug, Clone)]
pub struct RankedExemplar {
    pub record: Arc<ScenarioRecord>,
    pub similarity: f32,
    pub rank: usize,
}

/// Ordered retrieval output, best match first
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    pub exemplars: Vec<RankedExemplar>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.exemplars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exemplars.is_empty()
    }

    /// Record ids in rank order
    pub fn ids(&self) -> Vec<String> {
        self.exemplars
            .iter()
            .map(|exemplar| exemplar.record.id.clone())
            .collect()
    }

    pub fn top(&self) -> Option<&RankedExemplar> {
        self.exemplars.first()
    }
}
