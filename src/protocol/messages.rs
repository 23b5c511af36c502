//! Request and response types for the tool-providing service.
//!
//! The service exposes one entry point that takes a `method` discriminator and
//! a `params` payload. Responses are either a success payload or a structured
//! `{code, message}` error, modelled here as an explicit sum type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Wire name of the catalog-list method.
pub const METHOD_LIST_TOOLS: &str = "tools/list";
/// Wire name of the tool-invocation method.
pub const METHOD_CALL_TOOL: &str = "tools/call";
/// Wire name of the handshake method.
pub const METHOD_INITIALIZE: &str = "initialize";

/// Request sent to the tool service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    /// Fetch the tool catalog.
    ListTools,
    /// Invoke a tool by name.
    CallTool {
        /// Tool name.
        name: String,
        /// Argument mapping.
        arguments: Map<String, Value>,
    },
    /// Protocol handshake.
    Initialize {
        /// Client name reported to the service.
        client_name: String,
        /// Client version reported to the service.
        client_version: String,
    },
}

impl ServiceRequest {
    /// Build a tool invocation.
    pub fn call(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self::CallTool {
            name: name.into(),
            arguments,
        }
    }

    /// Handshake carrying this crate's name and version.
    pub fn initialize() -> Self {
        Self::Initialize {
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Wire discriminator for this request.
    pub fn method(&self) -> &'static str {
        match self {
            Self::ListTools => METHOD_LIST_TOOLS,
            Self::CallTool { .. } => METHOD_CALL_TOOL,
            Self::Initialize { .. } => METHOD_INITIALIZE,
        }
    }

    /// Wire payload for this request.
    pub fn params(&self) -> Value {
        match self {
            Self::ListTools => Value::Object(Map::new()),
            Self::CallTool { name, arguments } => json!({
                "name": name,
                "arguments": arguments,
            }),
            Self::Initialize {
                client_name,
                client_version,
            } => json!({
                "protocolVersion": super::PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": client_name,
                    "version": client_version,
                }
            }),
        }
    }
}

/// Response from the tool service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    /// Success payload.
    Success(Value),
    /// Structured error carrying a code and a message.
    Error(ServiceError),
}

impl ServiceResponse {
    /// Classify a raw response mapping.
    ///
    /// Only an `error` object with an integer `code` and a string `message`
    /// counts as a structured error. Anything else stays a success payload,
    /// including a malformed `error` member.
    pub fn from_value(value: Value) -> Self {
        if let Some(error) = value.get("error").and_then(ServiceError::from_value) {
            return Self::Error(error);
        }
        Self::Success(value)
    }

    /// Create a success response.
    pub fn success(value: Value) -> Self {
        Self::Success(value)
    }

    /// Create a success response wrapping a single text content block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(json!({
            "content": [{
                "type": "text",
                "text": text.into(),
            }]
        }))
    }

    /// Create an error response.
    pub fn error(error: ServiceError) -> Self {
        Self::Error(error)
    }

    /// True for a structured error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The structured error, if any.
    pub fn as_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Success(_) => None,
            Self::Error(e) => Some(e),
        }
    }

    /// True when the payload carries `content` and no `error` member at all.
    pub fn has_content(&self) -> bool {
        match self {
            Self::Success(value) => value.get("content").is_some() && value.get("error").is_none(),
            Self::Error(_) => false,
        }
    }

    /// Convert into a `Result`, mapping a structured error to `Err`.
    pub fn into_result(self) -> std::result::Result<Value, ServiceError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(e) => Err(e),
        }
    }

    /// Raw JSON form, as the service would have sent it.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Error(e) => json!({ "error": e }),
        }
    }
}

/// Error details in a service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ServiceError {
    /// Create a new error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Parse a raw `error` member; `None` unless both `code` and `message` are well-typed.
    pub fn from_value(value: &Value) -> Option<Self> {
        let code = value.get("code")?.as_i64()?;
        let message = value.get("message")?.as_str()?;
        Some(Self {
            code: i32::try_from(code).ok()?,
            message: message.to_string(),
            data: value.get("data").cloned(),
        })
    }

    /// Invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_REQUEST, message)
    }

    /// Method not found error (-32601).
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Method not found: {}", method.into()),
        )
    }

    /// Invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Standard error codes.
pub struct ErrorCode;

impl ErrorCode {
    /// Invalid JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters, including unknown tools.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal service error.
    pub const INTERNAL_ERROR: i32 = -32603;
}
