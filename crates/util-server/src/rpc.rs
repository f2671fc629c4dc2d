// JSON-RPC 2.0 envelopes for the stdio transport
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Wire shape of a client message before the version and id are checked.
/// A missing or null `id` marks a notification.
#[derive(Deserialize, Debug)]
struct Envelope {
    jsonrpc: String,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

/// A validated client message.
#[derive(Debug, PartialEq)]
pub enum Incoming {
    Request {
        id: Value,
        method: String,
        params: Option<Value>,
    },
    Notification {
        method: String,
    },
}

/// JSON that is not a JSON-RPC 2.0 message. Carries whatever `id` could be
/// recovered so the error reply can echo it.
#[derive(Error, Debug, PartialEq)]
#[error("{reason}")]
pub struct InvalidRequest {
    pub id: Value,
    pub reason: String,
}

impl Incoming {
    pub fn from_value(value: Value) -> Result<Self, InvalidRequest> {
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let envelope: Envelope = match serde_json::from_value(value) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Err(InvalidRequest {
                    id,
                    reason: e.to_string(),
                })
            }
        };
        if envelope.jsonrpc != JSONRPC_VERSION {
            return Err(InvalidRequest {
                id,
                reason: format!("unsupported jsonrpc version '{}'", envelope.jsonrpc),
            });
        }

        Ok(match envelope.id {
            Some(id) => Incoming::Request {
                id,
                method: envelope.method,
                params: envelope.params,
            },
            None => Incoming::Notification {
                method: envelope.method,
            },
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
}

#[derive(Deserialize, Debug)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Serialize, Debug)]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: &'static str,
    pub id: Value,
    pub result: T,
}

impl<T> JsonRpcResponse<T> {
    pub fn new(id: Value, result: T) -> Self {
        JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    pub error: ErrorObject,
}

#[derive(Serialize, Debug)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Value, code: i32, message: String) -> Self {
        JsonRpcErrorResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: ErrorObject { code, message },
        }
    }
}
