//! Input validation check

use async_trait::async_trait;
use serde_json::Map;

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

use super::strings;

/// Consistency between `required` and `properties`, and per-property typing
pub struct InputCheck;

impl InputCheck {
    pub fn issues(tool: &ToolDefinition) -> Vec<String> {
        let mut issues = Vec::new();
        if tool.raw_properties().is_some_and(|p| !p.is_object()) {
            issues.push("Schema properties must be an object of parameter definitions".to_string());
        }

        // absent or malformed properties declare nothing
        let empty = Map::new();
        let properties = tool.object_properties().unwrap_or(&empty);

        issues.extend(
            tool.required()
                .into_iter()
                .filter(|name| !properties.contains_key(*name))
                .map(|name| format!("Required field '{}' not defined in properties", name)),
        );

        for (name, definition) in properties {
            if definition.get("type").is_none() {
                issues.push(format!("Property '{}' missing type definition", name));
            }
            if definition.get("description").is_none() {
                issues.push(format!("Property '{}' missing description", name));
            }
        }

        issues
    }
}

#[async_trait]
impl Check for InputCheck {
    fn name(&self) -> TestName {
        TestName::InputValidation
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let issues = Self::issues(tool);
        Ok(TestVerdict::from_issues(
            self.name(),
            &issues,
            "Input validation passed",
            "Input handling issues",
            Severity::Warning,
        )
        .with_detail("issues", strings(&issues)))
    }
}
