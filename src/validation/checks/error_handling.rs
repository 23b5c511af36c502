//! Error handling check: adversarial invocations must come back as structured errors

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::tools::ToolDefinition;
use crate::validation::invoker::Invoker;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

fn adversarial_cases() -> [(&'static str, Map<String, Value>); 3] {
    let mut wrong_type = Map::new();
    wrong_type.insert("invalid_key".to_string(), json!(12345));
    let mut wrong_field = Map::new();
    wrong_field.insert("wrong_field".to_string(), json!("value"));

    [
        ("Empty arguments", Map::new()),
        ("Invalid argument types", wrong_type),
        ("Missing required arguments", wrong_field),
    ]
}

/// Sends malformed arguments and expects structured `{code, message}` errors back
pub struct ErrorHandlingCheck {
    invoker: Invoker,
    required_ratio: f64,
}

impl ErrorHandlingCheck {
    /// `required_ratio` is the fraction of cases that must be handled properly
    pub fn new(invoker: Invoker, required_ratio: f64) -> Self {
        Self { invoker, required_ratio }
    }
}

#[async_trait]
impl Check for ErrorHandlingCheck {
    fn name(&self) -> TestName {
        TestName::ErrorHandling
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let mut results = Vec::new();
        let mut handled = 0usize;

        for (description, arguments) in adversarial_cases() {
            let outcome = match self.invoker.call(tool.display_name(), arguments).await {
                Ok(response) => {
                    let proper = response.is_error();
                    if proper {
                        handled += 1;
                    }
                    json!({
                        "test_case": description,
                        "proper_error_handling": proper,
                        "response": response.to_value(),
                    })
                }
                Err(e) => json!({
                    "test_case": description,
                    "proper_error_handling": false,
                    "exception": e.to_string(),
                }),
            };
            results.push(outcome);
        }

        let total = results.len();
        let message = format!("Error handling: {}/{} cases handled properly", handled, total);
        let verdict = if handled as f64 >= total as f64 * self.required_ratio {
            TestVerdict::pass(self.name(), message)
        } else {
            TestVerdict::fail(self.name(), message, Severity::Warning)
        };
        Ok(verdict.with_detail("error_handling_results", Value::Array(results)))
    }
}
