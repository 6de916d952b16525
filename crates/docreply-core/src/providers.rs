//! Capability interfaces for the two model-backed operations.
//!
//! The engine core never talks to a provider SDK directly; callers
//! inject implementations of these traits. Test suites swap in
//! scripted doubles the same way.

use anyhow::Result;
use async_trait::async_trait;

use crate::prompt::GenerationRequest;

/// Turns text into a fixed-dimension embedding vector
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Produces a reply draft from an assembled generation request
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
