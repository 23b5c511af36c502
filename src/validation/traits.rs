//! Core validation interface: one named check, evaluated against one tool

use async_trait::async_trait;

use crate::error::Result;
use crate::tools::ToolDefinition;

use super::verdict::{TestName, TestVerdict};

/// A single independently testable check in the tool pipeline
#[async_trait]
pub trait Check: Send + Sync {
    /// Which check this is
    fn name(&self) -> TestName;

    /// Evaluate the check against a tool definition
    ///
    /// # Returns
    /// A verdict, or `Err` when the check itself could not run. The pipeline
    /// turns an `Err` into a failing error-severity verdict.
    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;

    struct MockCheck {
        should_pass: bool,
    }

    #[async_trait]
    impl Check for MockCheck {
        fn name(&self) -> TestName {
            TestName::SecurityCheck
        }

        async fn evaluate(&self, _tool: &ToolDefinition) -> Result<TestVerdict> {
            if self.should_pass {
                Ok(TestVerdict::pass(self.name(), "mock pass"))
            } else {
                Err(ProbeError::Check("mock failure".to_string()))
            }
        }
    }

    #[tokio::test]
    async fn test_check_trait_pass() {
        let check = MockCheck { should_pass: true };
        let verdict = check.evaluate(&ToolDefinition::new("t", "d")).await.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.test_name, TestName::SecurityCheck);
    }

    #[tokio::test]
    async fn test_check_trait_error() {
        let check = MockCheck { should_pass: false };
        assert!(check.evaluate(&ToolDefinition::new("t", "d")).await.is_err());
    }

    #[test]
    fn test_check_is_object_safe() {
        let checks: Vec<Box<dyn Check>> = vec![Box::new(MockCheck { should_pass: true })];
        assert_eq!(checks[0].name(), TestName::SecurityCheck);
    }
}
