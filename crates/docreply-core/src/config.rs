//! Engine configuration with environment overrides.
//!
//! Every knob has a compiled-in default; `DOCREPLY_*` environment
//! variables override individual values. Unparseable or out-of-range
//! values are logged and ignored rather than aborting startup.

use std::time::Duration;

use tracing::warn;

use crate::error::DraftError;
use crate::prompt::SamplingParams;

/// Full engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Exemplars requested per draft
    pub top_k: usize,
    /// Records scoring below this cosine similarity are discarded
    pub min_similarity: f32,
    /// Pairwise similarity above which two exemplars count as near-duplicates
    pub duplicate_threshold: f32,
    /// Byte budget per exemplar message when assembling prompts
    pub max_exemplar_length: usize,
    /// Disclaimer rate at or above which drafts must carry a disclaimer
    pub disclaimer_rate_threshold: f32,
    pub embed_timeout: Duration,
    pub generate_timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_similarity: 0.35,
            duplicate_threshold: 0.92,
            max_exemplar_length: 800,
            disclaimer_rate_threshold: 0.5,
            embed_timeout: Duration::from_secs(10),
            generate_timeout: Duration::from_secs(60),
            max_tokens: 1024,
            temperature: 0.6,
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(k) = env_parse::<usize>("DOCREPLY_TOP_K") {
            if k >= 1 {
                config.top_k = k;
            } else {
                warn!("Ignoring DOCREPLY_TOP_K: must be at least 1");
            }
        }
        if let Some(v) = env_parse::<f32>("DOCREPLY_MIN_SIMILARITY") {
            if (-1.0..=1.0).contains(&v) {
                config.min_similarity = v;
            } else {
                warn!("Ignoring DOCREPLY_MIN_SIMILARITY: must be within [-1, 1]");
            }
        }
        if let Some(v) = env_parse::<f32>("DOCREPLY_DUPLICATE_THRESHOLD") {
            if (0.0..=1.0).contains(&v) {
                config.duplicate_threshold = v;
            } else {
                warn!("Ignoring DOCREPLY_DUPLICATE_THRESHOLD: must be within [0, 1]");
            }
        }
        if let Some(v) = env_parse::<usize>("DOCREPLY_MAX_EXEMPLAR_LENGTH") {
            if v >= 1 {
                config.max_exemplar_length = v;
            } else {
                warn!("Ignoring DOCREPLY_MAX_EXEMPLAR_LENGTH: must be at least 1");
            }
        }
        if let Some(v) = env_parse::<f32>("DOCREPLY_DISCLAIMER_RATE_THRESHOLD") {
            if (0.0..=1.0).contains(&v) {
                config.disclaimer_rate_threshold = v;
            } else {
                warn!("Ignoring DOCREPLY_DISCLAIMER_RATE_THRESHOLD: must be within [0, 1]");
            }
        }
        if let Some(secs) = env_parse::<u64>("DOCREPLY_EMBED_TIMEOUT_SECS") {
            config.embed_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>("DOCREPLY_GENERATE_TIMEOUT_SECS") {
            config.generate_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = env_parse::<u32>("DOCREPLY_MAX_TOKENS") {
            config.max_tokens = v;
        }
        if let Some(v) = env_parse::<f32>("DOCREPLY_TEMPERATURE") {
            if v >= 0.0 {
                config.temperature = v;
            } else {
                warn!("Ignoring DOCREPLY_TEMPERATURE: must be non-negative");
            }
        }

        config
    }

    /// Per-draft knobs derived from this config
    pub fn draft_options(&self) -> DraftOptions {
        DraftOptions {
            k: self.top_k,
            min_similarity: self.min_similarity,
            max_exemplar_length: self.max_exemplar_length,
        }
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Per-request retrieval and assembly overrides
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOptions {
    pub k: usize,
    pub min_similarity: f32,
    pub max_exemplar_length: usize,
}

impl Default for DraftOptions {
    fn default() -> Self {
        EngineConfig::default().draft_options()
    }
}

impl DraftOptions {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.k == 0 {
            return Err(DraftError::InvalidRequest(
                "k must be at least 1".to_string(),
            ));
        }
        if self.min_similarity.is_nan() || !(-1.0..=1.0).contains(&self.min_similarity) {
            return Err(DraftError::InvalidRequest(format!(
                "min_similarity {} outside [-1, 1]",
                self.min_similarity
            )));
        }
        if self.max_exemplar_length == 0 {
            return Err(DraftError::InvalidRequest(
                "max_exemplar_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}: {:?}", name, raw);
            None
        }
    }
}
