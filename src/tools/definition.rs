//! Tool definitions as advertised by the service
//!
//! The catalog belongs to the service under audit, so nothing about its shape
//! can be trusted: a definition is kept as the raw JSON object and every
//! accessor returns an Option.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One catalog entry (`name`, `description`, `inputSchema`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolDefinition {
    raw: Value,
}

impl ToolDefinition {
    /// Create a well-formed definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            raw: json!({
                "name": name.into(),
                "description": description.into(),
                "inputSchema": {
                    "type": "object",
                    "properties": {},
                    "required": []
                }
            }),
        }
    }

    /// Wrap whatever the service sent
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Set input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.set("inputSchema", schema);
        self
    }

    /// Set an arbitrary top-level field
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Drop a top-level field
    pub fn without_field(mut self, key: &str) -> Self {
        if let Some(obj) = self.raw.as_object_mut() {
            obj.remove(key);
        }
        self
    }

    fn set(&mut self, key: &str, value: Value) {
        if !self.raw.is_object() {
            self.raw = Value::Object(Map::new());
        }
        if let Some(obj) = self.raw.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
    }

    /// Whether a top-level field is present
    pub fn has_field(&self, key: &str) -> bool {
        self.raw.get(key).is_some()
    }

    /// Raw `name` value
    pub fn name_value(&self) -> Option<&Value> {
        self.raw.get("name")
    }

    /// Tool name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    /// Tool name for display, `unknown` when absent
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("unknown")
    }

    /// Tool description, if present and a string
    pub fn description(&self) -> Option<&str> {
        self.raw.get("description").and_then(Value::as_str)
    }

    /// Raw input schema
    pub fn input_schema(&self) -> Option<&Value> {
        self.raw.get("inputSchema")
    }

    /// Schema `type`, if any
    pub fn schema_type(&self) -> Option<&str> {
        self.input_schema()?.get("type")?.as_str()
    }

    /// Declared properties of an object-typed schema
    ///
    /// Returns None unless the schema is `{"type": "object", "properties": {..}}`.
    pub fn object_properties(&self) -> Option<&Map<String, Value>> {
        if self.schema_type() != Some("object") {
            return None;
        }
        self.input_schema()?.get("properties")?.as_object()
    }

    /// Raw `properties` value of an object-typed schema, whatever its shape
    pub fn raw_properties(&self) -> Option<&Value> {
        if self.schema_type() != Some("object") {
            return None;
        }
        self.input_schema()?.get("properties")
    }

    /// Names listed in `required` of an object-typed schema
    pub fn required(&self) -> Vec<&str> {
        if self.schema_type() != Some("object") {
            return Vec::new();
        }
        self.input_schema()
            .and_then(|s| s.get("required"))
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether name, description and inputSchema are all present
    pub fn is_validation_ready(&self) -> bool {
        ["name", "description", "inputSchema"]
            .iter()
            .all(|field| self.has_field(field))
    }

    /// Borrow the raw JSON
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Take the raw JSON
    pub fn into_value(self) -> Value {
        self.raw
    }
}
