//! Sample argument generation for execution and performance checks

use serde_json::{Map, Value, json};

use crate::tools::ToolDefinition;

/// One argument set to invoke a tool with
#[derive(Debug, Clone, PartialEq)]
pub struct SampleInput {
    pub description: String,
    pub arguments: Map<String, Value>,
}

impl SampleInput {
    fn new(description: &str, arguments: Value) -> Self {
        Self {
            description: description.to_string(),
            arguments: arguments.as_object().cloned().unwrap_or_default(),
        }
    }
}

fn known_samples(name: &str) -> Option<Vec<SampleInput>> {
    let samples = match name {
        "echo" => vec![SampleInput::new("Basic echo test", json!({"message": "test message"}))],
        "read_file" => vec![SampleInput::new("Read README", json!({"path": "README.md"}))],
        "list_files" => vec![SampleInput::new("List current directory", json!({"directory": "."}))],
        _ => return None,
    };
    Some(samples)
}

fn placeholder(property: &Value) -> Value {
    match property.get("type").and_then(Value::as_str) {
        Some("number") | Some("integer") => json!(42),
        Some("boolean") => json!(true),
        _ => json!("test_value"),
    }
}

/// Sample inputs for a tool
///
/// Well-known tools get hand-written samples. Otherwise one sample fills each
/// declared required property with a placeholder; a schema with no required
/// properties yields one empty-argument sample. A non-object schema, or one
/// whose required names are all undeclared, yields nothing.
pub fn generate_samples(tool: &ToolDefinition) -> Vec<SampleInput> {
    if let Some(samples) = tool.name().and_then(known_samples) {
        return samples;
    }

    if tool.schema_type() != Some("object") {
        return Vec::new();
    }

    let empty = Map::new();
    let properties = tool.object_properties().unwrap_or(&empty);
    let required = tool.required();

    let arguments: Map<String, Value> = required
        .iter()
        .filter_map(|name| {
            properties
                .get(*name)
                .map(|prop| (name.to_string(), placeholder(prop)))
        })
        .collect();

    if arguments.is_empty() && !required.is_empty() {
        return Vec::new();
    }

    vec![SampleInput {
        description: "Generated test case".to_string(),
        arguments,
    }]
}
