//! Protocol compliance check for naming and documentation

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

use super::strings;

/// Shortest acceptable description, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 10;
/// Longest acceptable description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Naming and documentation conventions of the tool protocol
pub struct ProtocolCheck;

impl ProtocolCheck {
    pub fn issues(tool: &ToolDefinition) -> Vec<String> {
        let mut issues = Vec::new();

        if tool.name().unwrap_or_default().contains('/') {
            issues.push(
                "Tool names should not contain forward slashes (use underscores or hyphens)".to_string(),
            );
        }

        let length = tool.description().unwrap_or_default().chars().count();
        if length < MIN_DESCRIPTION_CHARS {
            issues.push(format!(
                "Tool description should be at least {} characters long",
                MIN_DESCRIPTION_CHARS
            ));
        } else if length > MAX_DESCRIPTION_CHARS {
            issues.push(format!(
                "Tool description should be concise (under {} characters)",
                MAX_DESCRIPTION_CHARS
            ));
        }

        if tool.raw_properties().is_some_and(|p| !p.is_object()) {
            issues.push("Schema properties must be an object of parameter definitions".to_string());
        }

        if let Some(properties) = tool.object_properties() {
            for (name, definition) in properties {
                match definition {
                    Value::Object(def) if !def.contains_key("description") => {
                        issues.push(format!("Property '{}' missing description", name));
                    }
                    Value::Object(_) => {}
                    _ => issues.push(format!("Property '{}' definition must be an object", name)),
                }
            }
        }

        issues
    }
}

#[async_trait]
impl Check for ProtocolCheck {
    fn name(&self) -> TestName {
        TestName::ProtocolCompliance
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let issues = Self::issues(tool);
        Ok(TestVerdict::from_issues(
            self.name(),
            &issues,
            "Protocol compliance passed",
            "Protocol issues found",
            Severity::Warning,
        )
        .with_detail("issues", strings(&issues)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_short_description_is_warning() {
        let verdict = ProtocolCheck
            .evaluate(&ToolDefinition::new("short", "tiny!"))
            .await
            .unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.severity, Severity::Warning);
        assert!(verdict.message.starts_with("Protocol issues found"));
    }

    #[test]
    fn test_description_bounds() {
        assert!(ProtocolCheck::issues(&ToolDefinition::new("t", "a".repeat(10))).is_empty());
        assert!(ProtocolCheck::issues(&ToolDefinition::new("t", "a".repeat(200))).is_empty());
        assert_eq!(ProtocolCheck::issues(&ToolDefinition::new("t", "a".repeat(201))).len(), 1);
        // Counted in characters, not bytes
        assert!(ProtocolCheck::issues(&ToolDefinition::new("t", "é".repeat(10))).is_empty());
    }

    #[test]
    fn test_slash_in_name() {
        let issues = ProtocolCheck::issues(&ToolDefinition::new("fs/read", "Reads a file from disk"));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("forward slashes"));
    }

    #[test]
    fn test_property_definitions() {
        let tool = ToolDefinition::new("t", "A sufficiently long description").with_schema(json!({
            "type": "object",
            "properties": {
                "documented": {"type": "string", "description": "ok"},
                "bare": {"type": "string"},
                "scalar": "string"
            }
        }));
        let issues = ProtocolCheck::issues(&tool);
        assert_eq!(
            issues,
            vec![
                "Property 'bare' missing description",
                "Property 'scalar' definition must be an object",
            ]
        );
    }

    #[test]
    fn test_properties_list_is_flagged() {
        let tool = ToolDefinition::new("t", "A sufficiently long description")
            .with_schema(json!({"type": "object", "properties": ["path"]}));
        assert_eq!(
            ProtocolCheck::issues(&tool),
            vec!["Schema properties must be an object of parameter definitions"]
        );
    }
}
