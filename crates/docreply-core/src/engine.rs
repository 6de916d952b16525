//! Draft orchestration, from patient message to gated reply
//!
//! A request flows pre-check, retrieval, profiling, assembly,
//! generation, post-check. A blocking pre-check verdict short-circuits
//! to a refusal before any provider call; a post-check rejection
//! triggers exactly one reinforced regeneration.

use std::sync::Arc;

use safety_engine::{SafetyEngine, ValidationContext};
use shared_types::{DraftResult, SafetyVerdict, ScenarioClass};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{DraftOptions, EngineConfig};
use crate::error::DraftError;
use crate::profile::PersonaProfiler;
use crate::prompt::{templates, GenerationRequest, PromptAssembler};
use crate::providers::{EmbeddingService, GenerationService};
use crate::retrieval::{RetrievalConfig, Retriever};
use crate::store::CorpusStore;

/// End-to-end reply drafting over an injected store and providers
pub struct DraftEngine {
    store: Arc<dyn CorpusStore>,
    retriever: Retriever,
    generator: Arc<dyn GenerationService>,
    safety: SafetyEngine,
    config: EngineConfig,
}

impl DraftEngine {
    pub fn new(
        store: Arc<dyn CorpusStore>,
        embedder: Arc<dyn EmbeddingService>,
        generator: Arc<dyn GenerationService>,
        config: EngineConfig,
    ) -> Self {
        let retriever = Retriever::new(store.clone(), embedder, RetrievalConfig::from(&config));
        Self {
            store,
            retriever,
            generator,
            safety: SafetyEngine::new(),
            config,
        }
    }

    /// Swap in a non-default safety engine (staged rule-table rollouts)
    pub fn with_safety_engine(mut self, safety: SafetyEngine) -> Self {
        self.safety = safety;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draft a reply using the engine-level default options
    pub async fn draft_reply(
        &self,
        patient_message: &str,
        persona_id: &str,
    ) -> Result<DraftResult, DraftError> {
        self.draft_reply_with(patient_message, persona_id, &self.config.draft_options())
            .await
    }

    /// Draft a reply with per-request retrieval and assembly options.
    ///
    /// Refusals are returned as successful `DraftResult`s carrying the
    /// blocking verdict; `Err` is reserved for request and upstream
    /// failures.
    pub async fn draft_reply_with(
        &self,
        patient_message: &str,
        persona_id: &str,
        options: &DraftOptions,
    ) -> Result<DraftResult, DraftError> {
        options.validate()?;

        let request_id = Uuid::new_v4();
        debug!(
            "[{}] drafting for persona {} (k={}, min_similarity={})",
            request_id, persona_id, options.k, options.min_similarity
        );

        let pre = self.safety.classify_scenario(patient_message);
        debug!(
            "[{}] pre-check classification: {}",
            request_id,
            pre.classification.as_str()
        );
        if pre.classification.is_blocking() {
            return Ok(self.refuse(request_id, patient_message, persona_id, pre));
        }

        let retrieval = self
            .retriever
            .retrieve(patient_message, persona_id, options.k, options.min_similarity)
            .await?;
        let profile = PersonaProfiler::profile(&retrieval)?;
        debug!(
            "[{}] profiled {} exemplars: {} tone, disclaimer rate {:.2}",
            request_id,
            profile.sample_count,
            profile.dominant_tone.as_str(),
            profile.disclaimer_rate
        );

        let require_disclaimer = profile.disclaimer_rate >= self.config.disclaimer_rate_threshold;
        let persona = self.store.persona_info(persona_id);
        let assembler = PromptAssembler::new(options.max_exemplar_length, self.config.sampling());
        let request = assembler.assemble(
            patient_message,
            &profile,
            &retrieval,
            persona.as_ref(),
            require_disclaimer,
        );
        debug!(
            "[{}] assembled request: {} exemplars, {} style directives",
            request_id,
            request.exemplars.len(),
            request.style_directives.len()
        );

        let draft = self.generate(&request, request_id).await?;

        let ctx = ValidationContext { require_disclaimer };
        let first_post = self.safety.validate_output(&draft, &ctx);

        let mut verdicts = vec![pre.clone()];
        let (final_draft, final_post) = if first_post.classification == ScenarioClass::Blocked {
            warn!(
                "[{}] post-check rejected draft ({:?}); regenerating once",
                request_id, first_post.reasons
            );
            let hits = self.safety.post_hits(&draft, &ctx);
            let reinforced = assembler.assemble_reinforced(&request, &hits);
            let retry = self.generate(&reinforced, request_id).await?;
            let retry_post = self.safety.validate_output(&retry, &ctx);
            if !retry_post.is_routine() {
                error!(
                    "[{}] regenerated draft still fails the post gate ({:?}); \
                     returning it flagged for review",
                    request_id, retry_post.reasons
                );
            }
            verdicts.push(first_post);
            (retry, retry_post)
        } else {
            (draft, first_post)
        };

        let escalation_flag = !pre.is_routine() || !final_post.is_routine();
        verdicts.push(final_post);

        info!(
            "[{}] completed for persona {}: {} exemplars, escalation={}",
            request_id,
            persona_id,
            retrieval.len(),
            escalation_flag
        );

        Ok(DraftResult {
            draft_text: final_draft,
            escalation_flag,
            exemplars_used: retrieval.ids(),
            safety_verdicts: verdicts,
        })
    }

    fn refuse(
        &self,
        request_id: Uuid,
        patient_message: &str,
        persona_id: &str,
        verdict: SafetyVerdict,
    ) -> DraftResult {
        for hit in self.safety.pre_hits(patient_message) {
            if let Some(term) = &hit.term {
                debug!(
                    "[{}] {} matched: {}",
                    request_id,
                    hit.rule_id,
                    safety_engine::patterns::extract_snippet(patient_message, term)
                );
            }
        }

        let persona = self.store.persona_info(persona_id);
        let message = templates::refusal_message(&verdict, self.safety.table(), persona.as_ref());
        info!(
            "[{}] refused ({}) for persona {} without generation",
            request_id,
            verdict.classification.as_str(),
            persona_id
        );

        DraftResult {
            draft_text: message,
            escalation_flag: true,
            exemplars_used: Vec::new(),
            safety_verdicts: vec![verdict],
        }
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        request_id: Uuid,
    ) -> Result<String, DraftError> {
        let draft = tokio::time::timeout(
            self.config.generate_timeout,
            self.generator.generate(request),
        )
        .await
        .map_err(|_| DraftError::UpstreamTimeout {
            operation: "generate",
            elapsed: self.config.generate_timeout,
        })?
        .map_err(DraftError::Generation)?;

        debug!("[{}] generated draft of {} bytes", request_id, draft.len());
        Ok(draft)
    }
}
