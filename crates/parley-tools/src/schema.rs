//! Builder for tool descriptor JSON Schemas.
//!
//! Replaces the repetitive `Map::new()` + `insert()` boilerplate with a
//! concise builder when constructing descriptors by hand.

use serde_json::{Map, Value, json};

use parley_core::tools::ToolDescriptor;

/// Fluent builder for [`ToolDescriptor`] argument schemas.
///
/// ```ignore
/// DescriptorBuilder::new("lookup_calendar", "Look up calendar entries")
///     .required_property("day", json!({"type": "string"}))
///     .property("limit", json!({"type": "number"}))
///     .build()
/// ```
pub struct DescriptorBuilder {
    name: String,
    description: String,
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl DescriptorBuilder {
    /// Start a descriptor with the given name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// Add an optional argument.
    #[must_use]
    pub fn property(mut self, name: &str, schema: Value) -> Self {
        let _ = self.properties.insert(name.into(), schema);
        self
    }

    /// Add a required argument.
    #[must_use]
    pub fn required_property(mut self, name: &str, schema: Value) -> Self {
        let _ = self.properties.insert(name.into(), schema);
        self.required.push(name.into());
        self
    }

    /// Build the final descriptor.
    #[must_use]
    pub fn build(self) -> ToolDescriptor {
        let mut schema = Map::new();
        let _ = schema.insert("type".into(), json!("object"));
        if !self.properties.is_empty() {
            let _ = schema.insert("properties".into(), Value::Object(self.properties));
        }
        if !self.required.is_empty() {
            let _ = schema.insert("required".into(), json!(self.required));
        }
        ToolDescriptor {
            name: self.name,
            description: self.description,
            input_schema: Value::Object(schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_schema() {
        let d = DescriptorBuilder::new("noop", "Does nothing").build();
        assert_eq!(d.name, "noop");
        assert_eq!(d.input_schema["type"], "object");
        assert!(d.input_schema.get("properties").is_none());
        assert!(d.input_schema.get("required").is_none());
    }

    #[test]
    fn required_and_optional_properties() {
        let d = DescriptorBuilder::new("lookup", "Look things up")
            .required_property("key", json!({"type": "string"}))
            .property("limit", json!({"type": "number"}))
            .build();

        assert_eq!(d.input_schema["properties"]["key"]["type"], "string");
        assert_eq!(d.input_schema["properties"]["limit"]["type"], "number");
        assert_eq!(d.input_schema["required"], json!(["key"]));
    }
}
