//! Validation strictness levels.
//!
//! A level fixes which checks run and the thresholds they apply:
//!
//! | level    | checks                                                | perf limit | error handling | perf runs |
//! |----------|-------------------------------------------------------|-----------:|---------------:|----------:|
//! | basic    | schema, protocol, execution, input                    |       2.0s |            50% |         3 |
//! | standard | all seven                                             |       2.0s |            50% |         3 |
//! | strict   | all seven                                             |       0.5s |           100% |         5 |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

use super::verdict::TestName;

/// How hard to push on each tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    Basic,
    #[default]
    Standard,
    Strict,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Basic => "basic",
            ValidationLevel::Standard => "standard",
            ValidationLevel::Strict => "strict",
        }
    }

    /// Checks run at this level, in pipeline order
    pub fn checks(&self) -> Vec<TestName> {
        match self {
            ValidationLevel::Basic => vec![
                TestName::SchemaValidation,
                TestName::ProtocolCompliance,
                TestName::ExecutionTest,
                TestName::InputValidation,
            ],
            ValidationLevel::Standard | ValidationLevel::Strict => TestName::ALL.to_vec(),
        }
    }

    /// Maximum acceptable average invocation time, in seconds
    pub fn performance_limit_secs(&self) -> f64 {
        match self {
            ValidationLevel::Strict => 0.5,
            _ => 2.0,
        }
    }

    /// Fraction of adversarial invocations that must yield a structured error
    pub fn error_handling_ratio(&self) -> f64 {
        match self {
            ValidationLevel::Strict => 1.0,
            _ => 0.5,
        }
    }

    /// Timed invocations per performance check
    pub fn performance_runs(&self) -> usize {
        match self {
            ValidationLevel::Strict => 5,
            _ => 3,
        }
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(ValidationLevel::Basic),
            "standard" => Ok(ValidationLevel::Standard),
            "strict" => Ok(ValidationLevel::Strict),
            other => Err(ProbeError::Config(format!("Unknown validation level: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("basic".parse::<ValidationLevel>().unwrap(), ValidationLevel::Basic);
        assert_eq!("STRICT".parse::<ValidationLevel>().unwrap(), ValidationLevel::Strict);
        assert!("lenient".parse::<ValidationLevel>().is_err());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(ValidationLevel::default(), ValidationLevel::Standard);
    }

    #[test]
    fn test_basic_skips_invoking_checks() {
        let checks = ValidationLevel::Basic.checks();
        assert_eq!(checks.len(), 4);
        assert!(!checks.contains(&TestName::ErrorHandling));
        assert!(!checks.contains(&TestName::PerformanceTest));
        assert!(!checks.contains(&TestName::SecurityCheck));
    }

    #[test]
    fn test_standard_and_strict_run_all() {
        assert_eq!(ValidationLevel::Standard.checks(), TestName::ALL.to_vec());
        assert_eq!(ValidationLevel::Strict.checks(), TestName::ALL.to_vec());
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(ValidationLevel::Standard.performance_limit_secs(), 2.0);
        assert_eq!(ValidationLevel::Strict.performance_limit_secs(), 0.5);
        assert_eq!(ValidationLevel::Strict.error_handling_ratio(), 1.0);
        assert_eq!(ValidationLevel::Strict.performance_runs(), 5);
        assert_eq!(ValidationLevel::Basic.performance_runs(), 3);
    }

    #[test]
    fn test_serde_lowercase() {
        let level: ValidationLevel = serde_yaml::from_str("strict").unwrap();
        assert_eq!(level, ValidationLevel::Strict);
    }
}
