//! Schema validation check

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

use super::strings;

const REQUIRED_FIELDS: [&str; 3] = ["name", "description", "inputSchema"];

/// Structural validity of the definition; critical, so failure halts the pipeline
pub struct SchemaCheck;

impl SchemaCheck {
    fn valid_name_chars(name: &str) -> bool {
        let stripped: String = name.chars().filter(|c| *c != '_' && *c != '-').collect();
        !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
    }

    /// Every structural problem with the definition
    pub fn errors(tool: &ToolDefinition) -> Vec<String> {
        let mut errors: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !tool.has_field(field))
            .map(|field| format!("Missing required field: {}", field))
            .collect();

        if let Some(schema) = tool.input_schema() {
            match schema.as_object() {
                None => errors.push("inputSchema must be an object".to_string()),
                Some(schema) => {
                    if !schema.contains_key("type") {
                        errors.push("inputSchema missing 'type' field".to_string());
                    }
                    if schema.get("type").and_then(Value::as_str) == Some("object")
                        && !schema.contains_key("properties")
                    {
                        errors.push("Object schema missing 'properties' field".to_string());
                    }
                    if schema.get("properties").is_some_and(|p| !p.is_object()) {
                        errors.push("inputSchema 'properties' must be an object".to_string());
                    }
                }
            }
        }

        if let Some(name) = tool.name_value() {
            match name.as_str() {
                Some(name) if !name.trim().is_empty() => {
                    if !Self::valid_name_chars(name) {
                        errors.push(
                            "Tool name should only contain alphanumeric characters, hyphens, and underscores"
                                .to_string(),
                        );
                    }
                }
                _ => errors.push("Tool name must be a non-empty string".to_string()),
            }
        }

        errors
    }
}

#[async_trait]
impl Check for SchemaCheck {
    fn name(&self) -> TestName {
        TestName::SchemaValidation
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let errors = Self::errors(tool);
        Ok(TestVerdict::from_issues(
            self.name(),
            &errors,
            "Schema validation passed",
            "Schema validation failed",
            Severity::Critical,
        )
        .with_detail("errors", strings(&errors))
        .with_detail("tool_schema", tool.as_value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_well_formed_tool_passes() {
        let verdict = SchemaCheck.evaluate(&ToolDefinition::new("echo", "Echo back")).await.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.severity, Severity::Info);
        assert_eq!(verdict.details["errors"], json!([]));
        assert_eq!(verdict.details["tool_schema"]["name"], "echo");
    }

    #[tokio::test]
    async fn test_missing_name_is_critical() {
        let tool = ToolDefinition::new("x", "desc").without_field("name");
        let verdict = SchemaCheck.evaluate(&tool).await.unwrap();
        assert!(verdict.is_critical_failure());
        assert!(verdict.message.contains("Missing required field: name"));
    }

    #[test]
    fn test_schema_shape_errors() {
        let not_object = ToolDefinition::new("x", "d").with_schema(json!("string"));
        assert_eq!(SchemaCheck::errors(&not_object), vec!["inputSchema must be an object"]);

        let no_type = ToolDefinition::new("x", "d").with_schema(json!({"properties": {}}));
        assert_eq!(SchemaCheck::errors(&no_type), vec!["inputSchema missing 'type' field"]);

        let no_props = ToolDefinition::new("x", "d").with_schema(json!({"type": "object"}));
        assert_eq!(
            SchemaCheck::errors(&no_props),
            vec!["Object schema missing 'properties' field"]
        );

        let list_props = ToolDefinition::new("x", "d").with_schema(json!({
            "type": "object",
            "properties": ["path"],
            "required": ["ghost"]
        }));
        assert_eq!(
            SchemaCheck::errors(&list_props),
            vec!["inputSchema 'properties' must be an object"]
        );
    }

    #[test]
    fn test_name_rules() {
        assert!(SchemaCheck::errors(&ToolDefinition::new("read-file_2", "d")).is_empty());
        assert_eq!(SchemaCheck::errors(&ToolDefinition::new("a/b", "d")).len(), 1);
        assert_eq!(SchemaCheck::errors(&ToolDefinition::new("a b", "d")).len(), 1);
        assert_eq!(
            SchemaCheck::errors(&ToolDefinition::new("   ", "d")),
            vec!["Tool name must be a non-empty string"]
        );
        assert_eq!(SchemaCheck::errors(&ToolDefinition::new("__", "d")).len(), 1);

        let numeric = ToolDefinition::new("x", "d").with_field("name", json!(7));
        assert_eq!(
            SchemaCheck::errors(&numeric),
            vec!["Tool name must be a non-empty string"]
        );
    }
}
