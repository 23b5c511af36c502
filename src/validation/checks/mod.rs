//! The seven pipeline checks.
//!
//! Static checks (schema, protocol, security, input) inspect the definition
//! only. Execution, error handling and performance invoke the tool through an
//! [`Invoker`].

mod error_handling;
mod execution;
mod input;
mod performance;
mod protocol;
mod schema;
mod security;

pub use error_handling::ErrorHandlingCheck;
pub use execution::ExecutionCheck;
pub use input::InputCheck;
pub use performance::{PerformanceCheck, rating as performance_rating};
pub use protocol::{MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS, ProtocolCheck};
pub use schema::SchemaCheck;
pub use security::{SENSITIVE_KEYWORDS, SecurityCheck};

use serde_json::Value;

use super::invoker::Invoker;
use super::level::ValidationLevel;
use super::traits::Check;
use super::verdict::TestName;

/// Build one check
pub fn build(name: TestName, level: ValidationLevel, invoker: &Invoker) -> Box<dyn Check> {
    match name {
        TestName::SchemaValidation => Box::new(SchemaCheck),
        TestName::ProtocolCompliance => Box::new(ProtocolCheck),
        TestName::ExecutionTest => Box::new(ExecutionCheck::new(invoker.clone())),
        TestName::ErrorHandling => Box::new(ErrorHandlingCheck::new(
            invoker.clone(),
            level.error_handling_ratio(),
        )),
        TestName::PerformanceTest => Box::new(PerformanceCheck::new(
            invoker.clone(),
            level.performance_runs(),
            level.performance_limit_secs(),
        )),
        TestName::SecurityCheck => Box::new(SecurityCheck),
        TestName::InputValidation => Box::new(InputCheck),
    }
}

/// All checks for a level, in pipeline order
pub fn for_level(level: ValidationLevel, invoker: &Invoker) -> Vec<Box<dyn Check>> {
    level
        .checks()
        .into_iter()
        .map(|name| build(name, level, invoker))
        .collect()
}

fn strings(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{Map, Value, json};

    use crate::error::{ProbeError, Result};
    use crate::protocol::{ServiceRequest, ServiceResponse, ToolService};
    use crate::validation::invoker::Invoker;

    /// Answers every invocation through a closure
    pub struct Scripted<F>(pub F);

    #[async_trait]
    impl<F> ToolService for Scripted<F>
    where
        F: Fn(&Map<String, Value>) -> ServiceResponse + Send + Sync,
    {
        async fn handle(&self, request: ServiceRequest) -> Result<ServiceResponse> {
            match request {
                ServiceRequest::CallTool { arguments, .. } => Ok((self.0)(&arguments)),
                _ => Ok(ServiceResponse::success(json!({"tools": []}))),
            }
        }
    }

    /// Every request fails at the transport level
    pub struct Unreachable;

    #[async_trait]
    impl ToolService for Unreachable {
        async fn handle(&self, _request: ServiceRequest) -> Result<ServiceResponse> {
            Err(ProbeError::Transport("connection refused".to_string()))
        }
    }

    pub fn scripted<F>(f: F) -> Arc<dyn ToolService>
    where
        F: Fn(&Map<String, Value>) -> ServiceResponse + Send + Sync + 'static,
    {
        Arc::new(Scripted(f))
    }

    pub fn invoker(service: Arc<dyn ToolService>) -> Invoker {
        Invoker::new(service, Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{Unreachable, invoker};

    #[test]
    fn test_for_level_order() {
        let invoker = invoker(std::sync::Arc::new(Unreachable));
        let names: Vec<TestName> = for_level(ValidationLevel::Standard, &invoker)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, TestName::ALL.to_vec());

        let basic: Vec<TestName> = for_level(ValidationLevel::Basic, &invoker)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(basic, ValidationLevel::Basic.checks());
    }
}
