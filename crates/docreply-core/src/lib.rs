//! Core drafting engine for DocReply
//!
//! This crate provides:
//! - A persona-partitioned corpus store with JSONL ingestion
//! - Top-k exemplar retrieval with similarity thresholds and
//!   near-duplicate suppression
//! - Persona style profiling (tone, length, greeting and closing habits)
//! - Prompt assembly with embedded safety policy clauses
//! - The `DraftEngine` orchestrator wrapping both safety gates

pub mod config;
pub mod engine;
pub mod error;
pub mod profile;
pub mod prompt;
pub mod providers;
pub mod record;
pub mod retrieval;
pub mod store;

// Re-export commonly used types
pub use config::{DraftOptions, EngineConfig};
pub use engine::DraftEngine;
pub use error::DraftError;
pub use profile::{PersonaProfile, PersonaProfiler};
pub use prompt::{ExemplarPair, GenerationRequest, PromptAssembler, SamplingParams};
pub use providers::{EmbeddingService, GenerationService};
pub use record::ScenarioRecord;
pub use retrieval::{RankedExemplar, RetrievalResult, Retriever};
pub use store::{CorpusStore, InMemoryCorpus};

// Shared types that appear in this crate's public signatures
pub use shared_types::{DraftResult, PersonaInfo, SafetyVerdict};
