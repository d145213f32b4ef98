//! Scripted model double for orchestrator tests.
//!
//! No live service in tests: [`ScriptedModel`] replays a queue of prepared
//! turns and records every request it saw, so tests can assert on both the
//! conversation flow and the exact prompts sent.

use parking_lot::Mutex;

use async_trait::async_trait;
use parley_core::tools::ToolDescriptor;

use crate::errors::ModelError;
use crate::service::{ModelService, ModelTurn, PromptRequest, ToolTurnRequest};

/// One scripted reply.
#[derive(Clone, Debug)]
pub enum ScriptedReply {
    /// Succeed with this turn.
    Turn(ModelTurn),
    /// Fail with a request error carrying this message.
    Fail(String),
}

/// A `ModelService` that replays scripted turns in order.
///
/// Replies are consumed front-to-back by both `prompt` and
/// `prompt_with_tools`; running out of script is an error, which keeps
/// a runaway loop from passing silently.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<Vec<ScriptedReply>>,
    seen_prompts: Mutex<Vec<PromptRequest>>,
    seen_turns: Mutex<Vec<ToolTurnRequest>>,
}

impl ScriptedModel {
    /// An empty script — every call fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text reply with no tool calls.
    #[must_use]
    pub fn reply_text(self, text: impl Into<String>) -> Self {
        self.replies.lock().push(ScriptedReply::Turn(ModelTurn {
            text: text.into(),
            tool_uses: Vec::new(),
        }));
        self
    }

    /// Queue a full turn (text plus tool calls).
    #[must_use]
    pub fn reply_turn(self, turn: ModelTurn) -> Self {
        self.replies.lock().push(ScriptedReply::Turn(turn));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn reply_error(self, message: impl Into<String>) -> Self {
        self.replies.lock().push(ScriptedReply::Fail(message.into()));
        self
    }

    /// Every plain request seen so far.
    #[must_use]
    pub fn prompts_seen(&self) -> Vec<PromptRequest> {
        self.seen_prompts.lock().clone()
    }

    /// Every tool-turn request seen so far.
    #[must_use]
    pub fn turns_seen(&self) -> Vec<ToolTurnRequest> {
        self.seen_turns.lock().clone()
    }

    fn next_reply(&self) -> Result<ModelTurn, ModelError> {
        let mut replies = self.replies.lock();
        if replies.is_empty() {
            return Err(ModelError::Unavailable("script exhausted".into()));
        }
        match replies.remove(0) {
            ScriptedReply::Turn(turn) => Ok(turn),
            ScriptedReply::Fail(msg) => Err(ModelError::Request(msg)),
        }
    }
}

#[async_trait]
impl ModelService for ScriptedModel {
    async fn prompt(&self, request: &PromptRequest) -> Result<String, ModelError> {
        self.seen_prompts.lock().push(request.clone());
        self.next_reply().map(|turn| turn.text)
    }

    async fn prompt_with_tools(
        &self,
        request: &ToolTurnRequest,
        _tools: &[ToolDescriptor],
    ) -> Result<ModelTurn, ModelError> {
        self.seen_turns.lock().push(request.clone());
        self.next_reply()
    }
}
