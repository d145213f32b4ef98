//! Shared tool vocabulary.
//!
//! The orchestrator treats tools as opaque: a descriptor advertises a tool to
//! the model, an outcome carries the result of one invocation back. The
//! registry trait that executes tools lives in `parley-tools`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptor advertising one tool to the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name — an opaque identity string.
    pub name: String,
    /// What the tool does, for the model's benefit.
    pub description: String,
    /// JSON Schema of the tool's arguments.
    pub input_schema: Value,
}

/// Result of one tool invocation.
///
/// Failures are data, not errors: a failed call is fed back to the model as
/// an error-tagged outcome so it can reason around the missing output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    /// Whether the invocation succeeded.
    pub success: bool,
    /// The tool's output on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The failure description on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    /// A successful outcome carrying `result`.
    #[must_use]
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// A failed outcome carrying an error description.
    #[must_use]
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_outcome_shape() {
        let out = ToolOutcome::ok(json!({"rows": 3}));
        assert!(out.success);
        assert_eq!(out.result.unwrap()["rows"], 3);
        assert!(out.error.is_none());
    }

    #[test]
    fn err_outcome_shape() {
        let out = ToolOutcome::err("timeout");
        assert!(!out.success);
        assert!(out.result.is_none());
        assert_eq!(out.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn outcome_wire_omits_absent_side() {
        let json = serde_json::to_value(ToolOutcome::err("nope")).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["success"], false);
    }

    #[test]
    fn descriptor_serde_roundtrip() {
        let d = ToolDescriptor {
            name: "lookup_calendar".into(),
            description: "Look up calendar entries".into(),
            input_schema: json!({"type": "object"}),
        };
        let back: ToolDescriptor =
            serde_json::from_str(&serde_json::to_string(&d).unwrap()).unwrap();
        assert_eq!(d, back);
    }
}
