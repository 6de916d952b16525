//! Provider doubles for the drafting flow tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use docreply_core::{EmbeddingService, GenerationRequest, GenerationService};

/// Embedder returning canned vectors keyed by exact message text
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| anyhow!("no canned embedding for {:?}", text))
    }
}

/// Generator replaying a fixed script, one draft per call.
/// The final entry repeats if the engine asks for more drafts than the
/// script holds, so a single-entry script acts as a constant generator.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(drafts: &[&str]) -> Self {
        Self {
            script: Mutex::new(drafts.iter().map(|draft| draft.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The nth request the engine sent, in call order
    pub fn request(&self, index: usize) -> GenerationRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            Ok(script.pop_front().unwrap())
        } else {
            script
                .front()
                .cloned()
                .ok_or_else(|| anyhow!("generator script is empty"))
        }
    }
}

/// Generator that sleeps past the configured timeout
pub struct SlowGenerator {
    delay: Duration,
}

impl SlowGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl GenerationService for SlowGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok("too late".to_string())
    }
}
