//! Tool System - definitions, catalog discovery, and the built-in example tools

mod analysis;
pub mod builtin;
mod catalog;
mod definition;

pub use analysis::{ComplexityLevel, ComplexityMetrics, ToolCategory};
pub use catalog::{CacheInfo, CatalogSnapshot, RegistryEntry, RegistryMetadata, ToolCatalog, ToolRegistry};
pub use definition::ToolDefinition;
