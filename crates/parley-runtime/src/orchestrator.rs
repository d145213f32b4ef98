//! The top-level query entry point.
//!
//! `handle_query` runs the whole pipeline: validate, filter through the
//! access tracker, assemble a bounded context, dispatch to the model (plain
//! or tool-augmented), parse the trailing answer markers, and attach the
//! confidentiality disclosure.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, instrument, warn};

use parley_access::AccessTracker;
use parley_core::acts::SpeechAct;
use parley_core::knowledge::KnowledgeEntry;
use parley_core::messages::Message;
use parley_core::participants::Participant;
use parley_core::query::{QueryRequest, QueryResponse};
use parley_core::text::preview_line;
use parley_facts::{FactQuery, FactStore};
use parley_llm::markers::parse_markers;
use parley_llm::{ModelService, PromptRequest};
use parley_memory::{MemoryConfig, MemoryContext, MemoryManager, ModelSummarizer, Summarizer};
use parley_tools::ToolRegistry;

use crate::disclosure::{self, FilterCounts};
use crate::errors::RuntimeError;
use crate::prompts;
use crate::tool_loop::run_tool_loop;

/// How the context for a query is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextMode {
    /// Recent window only, no summarization calls.
    Direct,
    /// Recent window plus summarized older history.
    Hybrid,
}

/// Per-query inputs the caller supplies alongside the request.
///
/// Messages and knowledge arrive unfiltered; facts come from the shared
/// store. Filtering happens inside `handle_query`, never before.
#[derive(Clone, Debug)]
pub struct QueryCorpus {
    /// Candidate messages, unfiltered.
    pub messages: Vec<Message>,
    /// Candidate knowledge entries, unfiltered. Knowledge carries no thread
    /// affiliation, so `QueryRequest::thread_id` never narrows it.
    pub knowledge: Vec<KnowledgeEntry>,
    /// Context assembly mode.
    pub mode: ContextMode,
}

/// One query's inputs after thread scoping and access filtering.
struct FilteredInputs {
    /// Messages in scope before access filtering — the disclosure baseline.
    scoped_messages: Vec<Message>,
    messages: Vec<Message>,
    facts: Vec<SpeechAct>,
    knowledge: Vec<KnowledgeEntry>,
    counts: FilterCounts,
}

/// Drives one query end to end against the shared registries.
///
/// The tracker and fact store are long-lived shared instances passed in
/// explicitly; the orchestrator itself holds no per-query state and is safe
/// to share across concurrent queries.
pub struct QueryOrchestrator {
    tracker: Arc<AccessTracker>,
    facts: Arc<FactStore>,
    memory: MemoryManager,
    model: Arc<dyn ModelService>,
    summarizer: Arc<dyn Summarizer>,
    tools: Option<Arc<dyn ToolRegistry>>,
    persona: Option<String>,
    temperature: Option<f32>,
    token_budget: Option<u64>,
}

impl QueryOrchestrator {
    /// Wire up an orchestrator over the shared registries and a model.
    ///
    /// Hybrid-mode summarization defaults to the model's own plain prompt
    /// path; override with [`with_summarizer`](Self::with_summarizer).
    #[must_use]
    pub fn new(
        tracker: Arc<AccessTracker>,
        facts: Arc<FactStore>,
        model: Arc<dyn ModelService>,
    ) -> Self {
        Self {
            tracker,
            facts,
            memory: MemoryManager::new(MemoryConfig::default()),
            summarizer: Arc::new(ModelSummarizer::new(model.clone())),
            model,
            tools: None,
            persona: None,
            temperature: None,
            token_budget: None,
        }
    }

    /// Enable the tool-augmented path.
    #[must_use]
    pub fn with_tools(mut self, tools: Arc<dyn ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Append a persona overlay after the confidentiality directive.
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Override the memory configuration.
    #[must_use]
    pub fn with_memory_config(mut self, config: MemoryConfig) -> Self {
        self.memory = MemoryManager::new(config);
        self
    }

    /// Replace the hybrid-mode summarizer.
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    /// Set a sampling temperature for answer calls.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Trim assembled contexts to this token budget.
    #[must_use]
    pub fn with_token_budget(mut self, budget: u64) -> Self {
        self.token_budget = Some(budget);
        self
    }

    /// Answer one query.
    #[instrument(skip_all, fields(asker = %request.asker.email, thread = ?request.thread_id))]
    pub async fn handle_query(
        &self,
        request: &QueryRequest,
        corpus: &QueryCorpus,
    ) -> Result<QueryResponse, RuntimeError> {
        request.validate()?;
        counter!("parley_queries_total").increment(1);
        let started = Instant::now();

        let current = request.all_participants();
        let FilteredInputs {
            scoped_messages,
            messages,
            facts,
            knowledge,
            counts,
        } = self.filter_inputs(request, corpus, &current);
        debug!(
            messages = counts.messages_after,
            facts = counts.facts_after,
            knowledge = counts.knowledge_after,
            "collections filtered"
        );

        let mut context = match corpus.mode {
            ContextMode::Direct => self.memory.build_direct(&messages, facts, knowledge),
            ContextMode::Hybrid => {
                self.memory
                    .build_context(&messages, facts, knowledge, self.summarizer.as_ref())
                    .await
            }
        };
        if let Some(budget) = self.token_budget {
            MemoryManager::trim_context(&mut context, budget);
        }
        histogram!("parley_query_context_tokens").record(context.estimated_tokens as f64);
        if context.degraded {
            warn!("answering over a degraded context");
        }

        let system_prompt = prompts::system_prompt(self.persona.as_deref());
        let user_prompt = prompts::user_prompt(&context, request);
        let mut sources = context.recent_message_ids();

        let raw = match &self.tools {
            Some(registry) => {
                let result = run_tool_loop(
                    self.model.as_ref(),
                    registry.as_ref(),
                    &system_prompt,
                    &user_prompt,
                    self.temperature,
                )
                .await?;
                if result.truncated {
                    warn!(rounds = result.rounds, "query answered from a truncated tool loop");
                }
                sources.extend(result.invoked_tools);
                result.text
            }
            None => {
                self.model
                    .prompt(&PromptRequest {
                        system_prompt,
                        user_prompt,
                        temperature: self.temperature,
                    })
                    .await?
            }
        };

        let parsed = parse_markers(&raw);
        let disclosed =
            disclosure::compute(self.tracker.as_ref(), &counts, &scoped_messages, &current);
        if disclosed.privacy_restricted {
            counter!("parley_queries_restricted_total").increment(1);
        }

        info!(
            sources = sources.len(),
            confidence = ?parsed.confidence,
            restricted = disclosed.privacy_restricted,
            answer = %preview_line(&parsed.answer, 80),
            "query answered"
        );
        histogram!("parley_query_duration_seconds").record(started.elapsed().as_secs_f64());
        Ok(QueryResponse {
            answer: parsed.answer,
            sources,
            privacy_restricted: disclosed.privacy_restricted,
            restricted_info: disclosed.restricted_info,
            confidence: parsed.confidence,
            suggested_skill_name: parsed.suggested_skill,
        })
    }

    /// The context a request would be answered against, without calling the
    /// model. Exposed for inspection tooling.
    pub async fn preview_context(
        &self,
        request: &QueryRequest,
        corpus: &QueryCorpus,
    ) -> Result<MemoryContext, RuntimeError> {
        request.validate()?;
        let current = request.all_participants();
        let FilteredInputs {
            messages,
            facts,
            knowledge,
            ..
        } = self.filter_inputs(request, corpus, &current);
        Ok(match corpus.mode {
            ContextMode::Direct => self.memory.build_direct(&messages, facts, knowledge),
            ContextMode::Hybrid => {
                self.memory
                    .build_context(&messages, facts, knowledge, self.summarizer.as_ref())
                    .await
            }
        })
    }

    /// Thread-scope, then access-filter, all three collections.
    ///
    /// Thread scoping narrows the corpus, not the confidentiality: it runs
    /// before filtering and sets the disclosure baseline, so an off-thread
    /// message is simply out of scope, never "withheld".
    fn filter_inputs(
        &self,
        request: &QueryRequest,
        corpus: &QueryCorpus,
        current: &[Participant],
    ) -> FilteredInputs {
        let scoped_messages: Vec<Message> = match &request.thread_id {
            Some(thread_id) => corpus
                .messages
                .iter()
                .filter(|m| &m.thread_id == thread_id)
                .cloned()
                .collect(),
            None => corpus.messages.clone(),
        };
        let scoped_facts = match &request.thread_id {
            Some(thread_id) => self.facts.get_by_thread(thread_id),
            None => self.facts.query(&FactQuery::any()),
        };

        let messages = self.tracker.filter(&scoped_messages, current);
        let facts = self.tracker.filter(&scoped_facts, current);
        let knowledge = self.tracker.filter(&corpus.knowledge, current);
        let counts = FilterCounts {
            messages_before: scoped_messages.len(),
            messages_after: messages.len(),
            facts_before: scoped_facts.len(),
            facts_after: facts.len(),
            knowledge_before: corpus.knowledge.len(),
            knowledge_after: knowledge.len(),
        };
        FilteredInputs {
            scoped_messages,
            messages,
            facts,
            knowledge,
            counts,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
