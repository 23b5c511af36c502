//! Client side of the tool-providing service contract
//!
//! Request/response types, the ToolService seam, and two transports: an
//! in-process registry and a JSON-RPC over HTTP client.

mod http;
mod messages;
mod service;

pub use http::{HttpToolService, decode_envelope, encode_envelope};
pub use messages::{
    ErrorCode, METHOD_CALL_TOOL, METHOD_INITIALIZE, METHOD_LIST_TOOLS, ServiceError, ServiceRequest,
    ServiceResponse,
};
pub use service::{LocalToolService, ToolHandler, ToolService};

/// Protocol revision spoken by the local service and sent in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
