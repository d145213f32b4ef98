//! Recording registry double for orchestrator tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use parley_core::tools::{ToolDescriptor, ToolOutcome};

use crate::registry::ToolRegistry;
use crate::schema::DescriptorBuilder;

/// A `ToolRegistry` that returns canned outcomes and records every
/// invocation in dispatch order.
#[derive(Default)]
pub struct RecordingRegistry {
    outcomes: HashMap<String, ToolOutcome>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingRegistry {
    /// Empty registry — every invocation fails as unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool name with a canned outcome.
    #[must_use]
    pub fn with_tool(mut self, name: impl Into<String>, outcome: ToolOutcome) -> Self {
        let _ = self.outcomes.insert(name.into(), outcome);
        self
    }

    /// Every `(name, args)` invocation seen, in dispatch order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolRegistry for RecordingRegistry {
    fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut names: Vec<&String> = self.outcomes.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| DescriptorBuilder::new(name.clone(), format!("canned tool {name}")).build())
            .collect()
    }

    async fn invoke(&self, name: &str, args: Value) -> ToolOutcome {
        self.calls.lock().push((name.to_owned(), args));
        self.outcomes
            .get(name)
            .cloned()
            .unwrap_or_else(|| ToolOutcome::err(format!("unknown tool: {name}")))
    }
}
