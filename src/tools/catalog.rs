//! Tool catalog discovery and caching
//!
//! Fetches the tool list from the service, keeps the last snapshot, and derives
//! categorization and complexity metadata from it.
//!
//! The cache never expires on its own. A snapshot stays valid until `refresh`
//! (or a `discover(false)` call) replaces it, so a tool registered after the
//! first discovery is invisible to cached lookups no matter how much time has
//! passed.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::panic_message;
use crate::protocol::{ServiceRequest, ServiceResponse, ToolService};

use super::analysis::{ComplexityMetrics, ToolCategory};
use super::definition::ToolDefinition;

/// One fetched catalog, replaced wholesale on refresh
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Tools in service order
    pub tools: Arc<Vec<ToolDefinition>>,
    /// When the snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Cache state for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    pub cached_tools: usize,
    pub cache_timestamp: Option<DateTime<Utc>>,
    pub cache_age_seconds: Option<f64>,
}

/// Per-tool entry of the registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEntry {
    pub definition: ToolDefinition,
    pub category: ToolCategory,
    pub complexity: ComplexityMetrics,
    pub validation_ready: bool,
}

/// Registry header
#[derive(Debug, Clone, Serialize)]
pub struct RegistryMetadata {
    pub total_tools: usize,
    pub discovery_timestamp: Option<DateTime<Utc>>,
    pub categories: BTreeMap<ToolCategory, usize>,
}

/// Catalog plus all derived metadata
#[derive(Debug, Clone, Serialize)]
pub struct ToolRegistry {
    pub metadata: RegistryMetadata,
    pub tools: BTreeMap<String, RegistryEntry>,
}

/// Client for the service's tool catalog
pub struct ToolCatalog {
    service: Arc<dyn ToolService>,
    cache: RwLock<Option<CatalogSnapshot>>,
}

impl ToolCatalog {
    /// Create a catalog client with an empty cache
    pub fn new(service: Arc<dyn ToolService>) -> Self {
        Self {
            service,
            cache: RwLock::new(None),
        }
    }

    /// Discover all tools
    ///
    /// With `use_cache` and an existing snapshot, returns the snapshot
    /// unchanged. Otherwise fetches, stores and returns a fresh one. Fetch
    /// failures, including a panicking service, are logged and yield an empty
    /// list without touching the cache.
    pub async fn discover(&self, use_cache: bool) -> Arc<Vec<ToolDefinition>> {
        if use_cache {
            if let Some(snapshot) = self.cache.read().await.as_ref() {
                tracing::debug!(tools = snapshot.tools.len(), "Using cached tool list");
                return Arc::clone(&snapshot.tools);
            }
        }

        tracing::info!("Discovering available tools");

        let fetch = AssertUnwindSafe(self.service.handle(ServiceRequest::ListTools)).catch_unwind();
        let response = match fetch.await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Exception during tool discovery");
                return Arc::new(Vec::new());
            }
            Err(payload) => {
                tracing::error!(error = %panic_message(payload.as_ref()), "Tool discovery panicked");
                return Arc::new(Vec::new());
            }
        };

        let payload = match response {
            ServiceResponse::Success(payload) => payload,
            ServiceResponse::Error(e) => {
                tracing::error!(code = e.code, message = %e.message, "Error discovering tools");
                return Arc::new(Vec::new());
            }
        };

        let tools: Vec<ToolDefinition> = payload
            .get("tools")
            .and_then(|t| t.as_array())
            .map(|list| list.iter().cloned().map(ToolDefinition::from_value).collect())
            .unwrap_or_default();

        tracing::info!(tools = tools.len(), "Discovered tools");

        let snapshot = CatalogSnapshot {
            tools: Arc::new(tools),
            fetched_at: Utc::now(),
        };
        let tools = Arc::clone(&snapshot.tools);
        *self.cache.write().await = Some(snapshot);
        tools
    }

    /// Look up one tool in the (cached) catalog
    pub async fn get_details(&self, name: &str) -> Option<ToolDefinition> {
        self.discover(true)
            .await
            .iter()
            .find(|tool| tool.name() == Some(name))
            .cloned()
    }

    /// Group tools by category; every category is present, possibly empty
    pub async fn categorize(&self) -> BTreeMap<ToolCategory, Vec<ToolDefinition>> {
        let tools = self.discover(true).await;
        let mut categories: BTreeMap<ToolCategory, Vec<ToolDefinition>> =
            ToolCategory::ALL.into_iter().map(|c| (c, Vec::new())).collect();

        for tool in tools.iter() {
            categories
                .entry(ToolCategory::classify(tool))
                .or_default()
                .push(tool.clone());
        }

        categories
    }

    /// Complexity metrics keyed by tool name
    pub async fn analyze_complexity(&self) -> BTreeMap<String, ComplexityMetrics> {
        self.discover(true)
            .await
            .iter()
            .map(|tool| (tool.display_name().to_string(), ComplexityMetrics::analyze(tool)))
            .collect()
    }

    /// Full registry: catalog, categories and complexity in one document
    pub async fn registry(&self) -> ToolRegistry {
        let tools = self.discover(true).await;
        let discovery_timestamp = self.cache.read().await.as_ref().map(|s| s.fetched_at);

        let mut categories: BTreeMap<ToolCategory, usize> =
            ToolCategory::ALL.into_iter().map(|c| (c, 0)).collect();
        let mut entries = BTreeMap::new();

        for tool in tools.iter() {
            let category = ToolCategory::classify(tool);
            *categories.entry(category).or_default() += 1;
            entries.insert(
                tool.display_name().to_string(),
                RegistryEntry {
                    definition: tool.clone(),
                    category,
                    complexity: ComplexityMetrics::analyze(tool),
                    validation_ready: tool.is_validation_ready(),
                },
            );
        }

        ToolRegistry {
            metadata: RegistryMetadata {
                total_tools: tools.len(),
                discovery_timestamp,
                categories,
            },
            tools: entries,
        }
    }

    /// Drop the snapshot and fetch a new one
    pub async fn refresh(&self) -> Arc<Vec<ToolDefinition>> {
        *self.cache.write().await = None;
        let tools = self.discover(false).await;
        tracing::info!(tools = tools.len(), "Tool cache refreshed");
        tools
    }

    /// Current cache state
    pub async fn cache_info(&self) -> CacheInfo {
        let cache = self.cache.read().await;
        match cache.as_ref() {
            Some(snapshot) => CacheInfo {
                cached_tools: snapshot.tools.len(),
                cache_timestamp: Some(snapshot.fetched_at),
                cache_age_seconds: Some(
                    (Utc::now() - snapshot.fetched_at).num_milliseconds() as f64 / 1000.0,
                ),
            },
            None => CacheInfo {
                cached_tools: 0,
                cache_timestamp: None,
                cache_age_seconds: None,
            },
        }
    }
}
