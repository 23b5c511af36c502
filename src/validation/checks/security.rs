//! Security check: sensitive keywords and unguarded path parameters

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

use super::strings;

/// Description words that suggest a destructive or privileged action
pub const SENSITIVE_KEYWORDS: [&str; 7] = ["delete", "remove", "execute", "run", "shell", "command", "system"];

/// Flags sensitive actions and unguarded file/path parameters
pub struct SecurityCheck;

impl SecurityCheck {
    pub fn issues(tool: &ToolDefinition) -> Vec<String> {
        let mut issues = Vec::new();

        let description = tool.description().unwrap_or_default().to_lowercase();
        let found: Vec<&str> = SENSITIVE_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| description.contains(kw))
            .collect();
        if !found.is_empty() {
            issues.push(format!(
                "Tool description mentions potentially dangerous operations: {}",
                found.join(", ")
            ));
        }

        if let Some(properties) = tool.object_properties() {
            for (name, definition) in properties {
                let lowered = name.to_lowercase();
                if !(lowered.contains("path") || lowered.contains("file")) {
                    continue;
                }
                let documented = definition
                    .get("description")
                    .and_then(Value::as_str)
                    .is_some_and(|d| d.to_lowercase().contains("validation"));
                if !documented {
                    issues.push(format!(
                        "File/path parameter '{}' lacks security validation description",
                        name
                    ));
                }
            }
        }

        issues
    }
}

#[async_trait]
impl Check for SecurityCheck {
    fn name(&self) -> TestName {
        TestName::SecurityCheck
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let issues = Self::issues(tool);
        Ok(TestVerdict::from_issues(
            self.name(),
            &issues,
            "Security check passed",
            "Security concerns",
            Severity::Warning,
        )
        .with_detail("security_issues", strings(&issues)))
    }
}
