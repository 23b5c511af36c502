//! Time-bounded tool invocation shared by the checks that call the service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{ProbeError, Result};
use crate::protocol::{ServiceRequest, ServiceResponse, ToolService};

/// Default per-invocation budget.
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues `tools/call` requests with a per-invocation timeout.
#[derive(Clone)]
pub struct Invoker {
    service: Arc<dyn ToolService>,
    timeout: Duration,
}

impl Invoker {
    pub fn new(service: Arc<dyn ToolService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke `name` with `arguments`. A timeout is an `Err` for this call only.
    pub async fn call(&self, name: &str, arguments: Map<String, Value>) -> Result<ServiceResponse> {
        let request = ServiceRequest::call(name, arguments);
        match tokio::time::timeout(self.timeout, self.service.handle(request)).await {
            Ok(result) => result,
            Err(_) => {
                let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(tool = name, timeout_ms = ms, "Tool invocation timed out");
                Err(ProbeError::Timeout(ms))
            }
        }
    }
}
