use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the drafting pipeline.
///
/// Safety refusals are not errors; they come back as a normal
/// `DraftResult` with blocking verdicts attached.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("no indexed replies for persona '{persona_id}'")]
    PersonaNotFound { persona_id: String },

    #[error("no exemplars above the similarity threshold to build a profile")]
    InsufficientData,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding service failed")]
    Embedding(#[source] anyhow::Error),

    #[error("generation service failed")]
    Generation(#[source] anyhow::Error),

    #[error("{operation} timed out after {elapsed:?}")]
    UpstreamTimeout {
        operation: &'static str,
        elapsed: Duration,
    },
}

impl DraftError {
    /// True when the caller's input is at fault rather than an upstream service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DraftError::PersonaNotFound { .. }
                | DraftError::InsufficientData
                | DraftError::InvalidRequest(_)
        )
    }

    /// True for transient upstream failures worth retrying
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            DraftError::Embedding(_)
                | DraftError::Generation(_)
                | DraftError::UpstreamTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DraftError::PersonaNotFound {
            persona_id: "dr_x".to_string(),
        };
        assert_eq!(err.to_string(), "no indexed replies for persona 'dr_x'");

        let err = DraftError::UpstreamTimeout {
            operation: "embed",
            elapsed: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "embed timed out after 10s");

        let err = DraftError::InvalidRequest("k must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid request: k must be at least 1");
    }

    #[test]
    fn test_client_and_upstream_split() {
        assert!(DraftError::InsufficientData.is_client_error());
        assert!(!DraftError::InsufficientData.is_upstream_error());

        let err = DraftError::Generation(anyhow::anyhow!("boom"));
        assert!(err.is_upstream_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_source_chain_preserved() {
        use std::error::Error as _;

        let err = DraftError::Embedding(anyhow::anyhow!("connection refused"));
        let source = err.source().expect("source should be attached");
        assert!(source.to_string().contains("connection refused"));
    }
}
