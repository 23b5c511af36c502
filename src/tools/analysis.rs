//! Static classification of catalog entries
//!
//! Keyword-based categorization and a schema complexity proxy. Neither says
//! anything about whether a tool is correct.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::definition::ToolDefinition;

/// Functional category of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    FileOperations,
    DataProcessing,
    Communication,
    SystemTools,
    Utility,
    Unknown,
}

impl ToolCategory {
    /// All categories, in tie-break order
    pub const ALL: [ToolCategory; 6] = [
        Self::FileOperations,
        Self::DataProcessing,
        Self::Communication,
        Self::SystemTools,
        Self::Utility,
        Self::Unknown,
    ];

    /// Get the snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileOperations => "file_operations",
            Self::DataProcessing => "data_processing",
            Self::Communication => "communication",
            Self::SystemTools => "system_tools",
            Self::Utility => "utility",
            Self::Unknown => "unknown",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::FileOperations => &["file", "read", "write", "list", "directory"],
            Self::DataProcessing => &["process", "transform", "parse", "convert"],
            Self::Communication => &["send", "receive", "message", "email", "http"],
            Self::SystemTools => &["system", "execute", "run", "command"],
            Self::Utility => &["echo", "test", "validate", "check"],
            Self::Unknown => &[],
        }
    }

    /// Classify a tool by first keyword match over its name and description
    pub fn classify(tool: &ToolDefinition) -> Self {
        let name = tool.name().unwrap_or_default().to_lowercase();
        let description = tool.description().unwrap_or_default().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .keywords()
                    .iter()
                    .any(|kw| name.contains(kw) || description.contains(kw))
            })
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse complexity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    /// Bucket a raw score: <=2 simple, <=5 moderate, else complex
    pub fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            Self::Simple
        } else if score <= 5.0 {
            Self::Moderate
        } else {
            Self::Complex
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }
}

/// Schema-derived complexity metrics for one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub parameter_count: usize,
    pub required_parameters: usize,
    pub nested_objects: usize,
    pub has_arrays: bool,
    pub complexity_score: f64,
    pub complexity_level: ComplexityLevel,
}

impl ComplexityMetrics {
    /// Walk `inputSchema.properties`: nested object 2, array 1, anything else 0.5
    pub fn analyze(tool: &ToolDefinition) -> Self {
        let mut metrics = Self {
            parameter_count: 0,
            required_parameters: 0,
            nested_objects: 0,
            has_arrays: false,
            complexity_score: 0.0,
            complexity_level: ComplexityLevel::Simple,
        };

        if let Some(properties) = tool.object_properties() {
            metrics.parameter_count = properties.len();
            metrics.required_parameters = tool.required().len();

            for definition in properties.values().filter(|d| d.is_object()) {
                match definition.get("type").and_then(Value::as_str) {
                    Some("object") => {
                        metrics.nested_objects += 1;
                        metrics.complexity_score += 2.0;
                    }
                    Some("array") => {
                        metrics.has_arrays = true;
                        metrics.complexity_score += 1.0;
                    }
                    _ => metrics.complexity_score += 0.5,
                }
            }
        }

        metrics.complexity_level = ComplexityLevel::from_score(metrics.complexity_score);
        metrics
    }
}
