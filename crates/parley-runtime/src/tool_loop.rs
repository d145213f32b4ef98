//! The bounded tool-use loop as an explicit state machine.
//!
//! Each round submits the prompt plus the available tool descriptors. A turn
//! with no tool calls is the final answer (`Done`); otherwise every requested
//! call is executed sequentially, the outcomes are fed back, and the round
//! counter advances. Hitting the round bound yields `Truncated` with the best
//! text seen so far — exhaustion is a degraded result, not an error.

use metrics::{counter, histogram};
use tracing::{debug, instrument, warn};

use parley_core::text::preview_line;
use parley_llm::{ModelService, ToolResultSubmission, ToolTurnRequest};
use parley_tools::ToolRegistry;

use crate::errors::RuntimeError;

/// Maximum model rounds before the loop gives up.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Where the loop currently is. Public so tests can drive transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the model's next turn.
    AwaitingModel,
    /// Executing the tool calls the model just requested.
    ExecutingTools,
    /// The model answered without requesting tools.
    Done,
    /// The round bound was reached without a final answer.
    Truncated,
}

/// What the loop produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopResult {
    /// Final (or best-effort) answer text, markers still attached.
    pub text: String,
    /// `tool:<name>` per invocation, in dispatch order. Duplicates are
    /// preserved: each entry is one real invocation, the audit record
    /// must not collapse them.
    pub invoked_tools: Vec<String>,
    /// Model rounds consumed.
    pub rounds: usize,
    /// Whether the loop hit [`MAX_TOOL_ROUNDS`] before a final answer.
    pub truncated: bool,
}

/// Drive the tool-augmented conversation to completion.
///
/// Tool failures never abort the loop: they come back from the registry as
/// error-tagged outcomes and are fed to the model like any other result.
/// Only a model-service failure propagates.
#[instrument(skip_all, fields(max_rounds = MAX_TOOL_ROUNDS))]
pub async fn run_tool_loop(
    model: &dyn ModelService,
    registry: &dyn ToolRegistry,
    system_prompt: &str,
    user_prompt: &str,
    temperature: Option<f32>,
) -> Result<LoopResult, RuntimeError> {
    let descriptors = registry.descriptors();
    let mut state = LoopState::AwaitingModel;
    let mut tool_results: Vec<ToolResultSubmission> = Vec::new();
    let mut invoked_tools = Vec::new();
    let mut last_text = String::new();
    let mut rounds = 0;

    while state == LoopState::AwaitingModel {
        if rounds == MAX_TOOL_ROUNDS {
            state = LoopState::Truncated;
            break;
        }
        rounds += 1;

        let request = ToolTurnRequest {
            system_prompt: system_prompt.to_owned(),
            user_prompt: user_prompt.to_owned(),
            tool_results: std::mem::take(&mut tool_results),
            temperature,
        };
        let turn = model.prompt_with_tools(&request, &descriptors).await?;
        if !turn.text.is_empty() {
            last_text = turn.text;
        }

        if turn.tool_uses.is_empty() {
            state = LoopState::Done;
            break;
        }

        state = LoopState::ExecutingTools;
        debug!(round = rounds, requested = turn.tool_uses.len(), "executing tool calls");
        for tool_use in turn.tool_uses {
            let outcome = registry.invoke(&tool_use.name, tool_use.input).await;
            if !outcome.success {
                warn!(tool = %tool_use.name, round = rounds, "tool call failed");
                counter!("parley_tool_failures_total").increment(1);
            }
            counter!("parley_tool_invocations_total").increment(1);
            invoked_tools.push(format!("tool:{}", tool_use.name));
            tool_results.push(ToolResultSubmission {
                tool_use_id: tool_use.id,
                name: tool_use.name,
                outcome,
            });
        }
        state = LoopState::AwaitingModel;
    }

    let truncated = state == LoopState::Truncated;
    if truncated {
        warn!(
            rounds,
            best_text = %preview_line(&last_text, 60),
            "tool loop truncated without a final answer"
        );
        counter!("parley_tool_loops_truncated_total").increment(1);
    }
    histogram!("parley_tool_loop_rounds").record(rounds as f64);

    Ok(LoopResult {
        text: last_text,
        invoked_tools,
        rounds,
        truncated,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
