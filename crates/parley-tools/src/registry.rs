//! Tool registry trait and the static in-process implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use parley_core::tools::{ToolDescriptor, ToolOutcome};

/// One registered tool: a descriptor plus an invocation.
#[async_trait]
pub trait RegisteredTool: Send + Sync {
    /// Descriptor advertised to the model.
    fn descriptor(&self) -> ToolDescriptor;

    /// Run the tool. Failures are returned as error-tagged outcomes,
    /// never raised.
    async fn invoke(&self, args: Value) -> ToolOutcome;
}

/// The registry boundary the orchestrator calls through.
///
/// Tool identity is an opaque name string; `invoke` on an unknown name
/// yields an error-tagged outcome rather than an error.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Descriptors of every available tool, in registration order.
    fn descriptors(&self) -> Vec<ToolDescriptor>;

    /// Invoke one tool by name.
    async fn invoke(&self, name: &str, args: Value) -> ToolOutcome;
}

/// An in-process registry over a fixed tool set.
#[derive(Default)]
pub struct StaticToolRegistry {
    /// Registration order, for stable descriptor listings.
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn RegisteredTool>>,
}

impl StaticToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Re-registering a name replaces the tool but keeps
    /// its original position.
    pub fn register(&mut self, tool: Arc<dyn RegisteredTool>) {
        let name = tool.descriptor().name;
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        let _ = self.tools.insert(name, tool);
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolRegistry for StaticToolRegistry {
    fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.descriptor())
            .collect()
    }

    async fn invoke(&self, name: &str, args: Value) -> ToolOutcome {
        match self.tools.get(name) {
            Some(tool) => tool.invoke(args).await,
            None => {
                warn!(tool = name, "unknown tool requested");
                ToolOutcome::err(format!("unknown tool: {name}"))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
