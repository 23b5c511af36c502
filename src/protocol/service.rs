//! The tool service seam and an in-process implementation.
//!
//! Defines the ToolService trait consumed by the auditor and LocalToolService,
//! which dispatches requests to registered ToolHandlers in the same process.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::tools::ToolDefinition;

use super::PROTOCOL_VERSION;
use super::messages::{ServiceError, ServiceRequest, ServiceResponse};

/// Single request/response entry point of a tool-providing service
///
/// `Err` means the request never produced a response (transport failure).
/// A service-reported failure is `Ok(ServiceResponse::Error(..))`.
#[async_trait]
pub trait ToolService: Send + Sync {
    /// Handle one request
    async fn handle(&self, request: ServiceRequest) -> Result<ServiceResponse>;
}

#[async_trait]
impl<T: ToolService + ?Sized> ToolService for Arc<T> {
    async fn handle(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        (**self).handle(request).await
    }
}

/// A tool hosted by LocalToolService
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Catalog entry advertised for this tool
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool
    async fn call(&self, arguments: &Map<String, Value>) -> ServiceResponse;
}

/// In-process tool service for local auditing and tests
pub struct LocalToolService {
    name: String,
    handlers: RwLock<Vec<Arc<dyn ToolHandler>>>,
}

impl LocalToolService {
    /// Create an empty service
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Service hosting the built-in example tools
    pub fn with_builtin_tools(name: impl Into<String>) -> Self {
        crate::tools::builtin::all()
            .into_iter()
            .fold(Self::new(name), |service, handler| service.with_handler(handler))
    }

    /// Add a handler during construction
    pub fn with_handler(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        Self::upsert(self.handlers.get_mut(), handler);
        self
    }

    /// Register a handler on a live service; replaces one with the same name
    pub async fn register(&self, handler: Arc<dyn ToolHandler>) {
        let mut handlers = self.handlers.write().await;
        Self::upsert(&mut handlers, handler);
    }

    /// Service name reported by `initialize`
    pub fn name(&self) -> &str {
        &self.name
    }

    fn upsert(handlers: &mut Vec<Arc<dyn ToolHandler>>, handler: Arc<dyn ToolHandler>) {
        let name = handler.definition().name().map(str::to_string);
        match handlers
            .iter()
            .position(|h| h.definition().name().map(str::to_string) == name)
        {
            Some(idx) => handlers[idx] = handler,
            None => handlers.push(handler),
        }
    }

    async fn find(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers
            .read()
            .await
            .iter()
            .find(|h| h.definition().name() == Some(name))
            .cloned()
    }
}

#[async_trait]
impl ToolService for LocalToolService {
    async fn handle(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        log::debug!("Handling request: {}", request.method());

        let response = match request {
            ServiceRequest::ListTools => {
                let tools: Vec<Value> = self
                    .handlers
                    .read()
                    .await
                    .iter()
                    .map(|h| h.definition().into_value())
                    .collect();
                ServiceResponse::success(json!({ "tools": tools }))
            }
            ServiceRequest::CallTool { name, arguments } => match self.find(&name).await {
                Some(handler) => handler.call(&arguments).await,
                None => ServiceResponse::error(ServiceError::invalid_params(format!(
                    "Tool not found: {}",
                    name
                ))),
            },
            ServiceRequest::Initialize { .. } => ServiceResponse::success(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                },
                "serverInfo": {
                    "name": self.name,
                    "version": env!("CARGO_PKG_VERSION"),
                }
            })),
        };

        Ok(response)
    }
}
