//! Execution check: sample invocations must return content

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::invoker::Invoker;
use crate::validation::samples::generate_samples;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

/// Invokes the tool with each sample; passes if any sample yields content
pub struct ExecutionCheck {
    invoker: Invoker,
}

impl ExecutionCheck {
    pub fn new(invoker: Invoker) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl Check for ExecutionCheck {
    fn name(&self) -> TestName {
        TestName::ExecutionTest
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let samples = generate_samples(tool);
        let mut results = Vec::with_capacity(samples.len());
        let mut succeeded = 0;

        for sample in samples {
            let outcome = match self.invoker.call(tool.display_name(), sample.arguments).await {
                Ok(response) => {
                    let success = response.has_content();
                    json!({
                        "test_case": sample.description,
                        "success": success,
                        "response": response.to_value(),
                    })
                }
                Err(e) => json!({
                    "test_case": sample.description,
                    "success": false,
                    "error": e.to_string(),
                }),
            };
            if outcome["success"] == Value::Bool(true) {
                succeeded += 1;
            }
            results.push(outcome);
        }

        let total = results.len();
        let message = format!("Execution test: {}/{} test cases passed", succeeded, total);
        let verdict = if succeeded > 0 {
            TestVerdict::pass(self.name(), message)
        } else {
            TestVerdict::fail(self.name(), message, Severity::Error)
        };
        Ok(verdict.with_detail("execution_results", Value::Array(results)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::checks::test_support::{invoker, scripted};
    use crate::protocol::{ServiceError, ServiceResponse};

    #[tokio::test]
    async fn test_echo_executes() {
        let check = ExecutionCheck::new(invoker(scripted(|_| ServiceResponse::text("ok"))));
        let verdict = check.evaluate(&ToolDefinition::new("echo", "Echo")).await.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.message, "Execution test: 1/1 test cases passed");
        assert_eq!(verdict.details["execution_results"][0]["test_case"], "Basic echo test");
    }

    #[tokio::test]
    async fn test_error_response_fails() {
        let check = ExecutionCheck::new(invoker(scripted(|_| {
            ServiceResponse::error(ServiceError::internal_error("broken"))
        })));
        let verdict = check.evaluate(&ToolDefinition::new("custom", "Custom")).await.unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.severity, Severity::Error);
        assert_eq!(verdict.message, "Execution test: 0/1 test cases passed");
    }

    #[tokio::test]
    async fn test_content_with_error_key_fails() {
        let check = ExecutionCheck::new(invoker(scripted(|_| {
            ServiceResponse::success(json!({"content": [], "error": "malformed"}))
        })));
        let verdict = check.evaluate(&ToolDefinition::new("custom", "Custom")).await.unwrap();
        assert!(!verdict.passed);
    }

    #[tokio::test]
    async fn test_no_samples_fails() {
        let tool = ToolDefinition::new("custom", "Custom").with_schema(json!({"type": "string"}));
        let check = ExecutionCheck::new(invoker(scripted(|_| ServiceResponse::text("ok"))));
        let verdict = check.evaluate(&tool).await.unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.message, "Execution test: 0/0 test cases passed");
    }
}
