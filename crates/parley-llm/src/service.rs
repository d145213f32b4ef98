//! The `ModelService` trait and its request/turn types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use parley_core::tools::{ToolDescriptor, ToolOutcome};

use crate::errors::ModelError;

/// A single plain prompt round-trip.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptRequest {
    /// System prompt, including the confidentiality directive.
    pub system_prompt: String,
    /// Assembled context plus the user's question.
    pub user_prompt: String,
    /// Sampling temperature override, provider default when `None`.
    pub temperature: Option<f32>,
}

/// A tool call requested by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUse {
    /// Provider-assigned call id, echoed back with the result.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Arguments for the call.
    pub input: Value,
}

/// One executed tool call being fed back for the next round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultSubmission {
    /// The [`ToolUse::id`] this result answers.
    pub tool_use_id: String,
    /// Tool name, for audit rendering.
    pub name: String,
    /// Success or error-tagged outcome.
    pub outcome: ToolOutcome,
}

/// One round of the tool-augmented conversation.
///
/// The first round carries empty `tool_results`; each later round carries
/// the outcomes of every call the model requested in the previous turn.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolTurnRequest {
    /// System prompt, constant across rounds.
    pub system_prompt: String,
    /// Assembled context plus the user's question, constant across rounds.
    pub user_prompt: String,
    /// Outcomes from the previous round, in dispatch order.
    pub tool_results: Vec<ToolResultSubmission>,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
}

/// What the model produced in one tool-augmented turn.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelTurn {
    /// Text content of the turn (may be empty when only tools were
    /// requested).
    pub text: String,
    /// Tool calls the model wants executed before it will answer.
    /// Empty means the turn's text is the final answer.
    pub tool_uses: Vec<ToolUse>,
}

/// The language-model service boundary.
///
/// Implementations are provider adapters living outside this workspace;
/// tests use [`crate::testutil::ScriptedModel`].
#[async_trait]
pub trait ModelService: Send + Sync {
    /// One plain round-trip: prompt in, raw answer text out.
    async fn prompt(&self, request: &PromptRequest) -> Result<String, ModelError>;

    /// One tool-augmented turn: prompt plus available tools in, text and
    /// requested tool calls out.
    async fn prompt_with_tools(
        &self,
        request: &ToolTurnRequest,
        tools: &[ToolDescriptor],
    ) -> Result<ModelTurn, ModelError>;
}
