//! Near-duplicate suppression for retrieved exemplars
//!
//! Style corpora often hold several nearly identical exchanges. Showing
//! the generator the same exemplar twice wastes prompt budget, so when
//! two candidates are closer to each other than the duplicate threshold
//! the lower-ranked one is skipped and the next distinct candidate
//! takes its slot.

use std::sync::Arc;

use tracing::debug;

use crate::record::ScenarioRecord;
use crate::retrieval::similarity::cosine_similarity;

/// Greedily pick up to `k` candidates in rank order, skipping any whose
/// embedding similarity to an already kept candidate exceeds
/// `duplicate_threshold`. Input must already be sorted best-first.
pub fn select_diverse(
    ranked: Vec<(Arc<ScenarioRecord>, f32)>,
    k: usize,
    duplicate_threshold: f32,
) -> Vec<(Arc<ScenarioRecord>, f32)> {
    let mut selected: Vec<(Arc<ScenarioRecord>, f32)> = Vec::with_capacity(k.min(ranked.len()));

    for (record, score) in ranked {
        if selected.len() == k {
            break;
        }
        let near_duplicate = selected.iter().any(|(kept, _)| {
            cosine_similarity(&kept.embedding_vector, &record.embedding_vector)
                > duplicate_threshold
        });
        if near_duplicate {
            debug!("Skipping near-duplicate exemplar {}", record.id);
            continue;
        }
        selected.push((record, score));
    }

    selected
}
