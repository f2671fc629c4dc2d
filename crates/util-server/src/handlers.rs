// JSON-RPC method handlers for the MCP server
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::rpc::{
    Incoming, InitializeParams, JsonRpcErrorResponse, JsonRpcResponse, ToolCallParams,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::{call_tool, get_tools_description_json, DispatchError, ToolContext};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "util-server";

/// Handle one decoded JSON message. Notifications yield no reply.
pub fn handle_message(ctx: &ToolContext, message: Value) -> Option<Value> {
    match Incoming::from_value(message) {
        Ok(Incoming::Request { id, method, params }) => {
            Some(handle_request(ctx, id, &method, params))
        }
        Ok(Incoming::Notification { method }) => {
            debug!(%method, "notification");
            None
        }
        Err(e) => {
            warn!(reason = %e, "invalid JSON-RPC request");
            Some(invalid_request(e.id))
        }
    }
}

/// Reply for a line that is not valid JSON.
pub fn parse_error(id: Value) -> Value {
    error_response(id, PARSE_ERROR, "Parse error".to_string())
}

/// Reply for valid JSON that is not a JSON-RPC 2.0 request, or an empty batch.
pub fn invalid_request(id: Value) -> Value {
    error_response(id, INVALID_REQUEST, "Invalid Request".to_string())
}

fn handle_request(ctx: &ToolContext, id: Value, method: &str, params: Option<Value>) -> Value {
    match method {
        "initialize" => process_init(id, params),
        "tools/list" => ok_response(id, json!({ "tools": get_tools_description_json() })),
        "ping" => ok_response(id, json!({})),
        "tools/call" => process_tool_call(ctx, id, params),
        _ => error_response(id, METHOD_NOT_FOUND, format!("Method not found: {method}")),
    }
}

fn process_init(id: Value, params: Option<Value>) -> Value {
    let params = match params.map(serde_json::from_value::<InitializeParams>) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return error_response(id, INVALID_PARAMS, format!("Invalid params for initialize: {e}"))
        }
        None => {
            return error_response(
                id,
                INVALID_PARAMS,
                "Invalid params for initialize: missing params".to_string(),
            )
        }
    };

    debug!(client_protocol = %params.protocol_version, "initialize");
    ok_response(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn process_tool_call(ctx: &ToolContext, id: Value, params: Option<Value>) -> Value {
    let Some(Ok(tool_params)) = params.map(serde_json::from_value::<ToolCallParams>) else {
        return error_response(id, INVALID_PARAMS, "Invalid params for tools/call".to_string());
    };

    debug!(tool = %tool_params.name, "tool call");
    match call_tool(ctx, &tool_params.name, tool_params.arguments) {
        Ok(output) => ok_response(id, output.to_result()),
        Err(DispatchError::UnknownTool(name)) => {
            warn!(tool = %name, "unknown tool");
            error_response(id, METHOD_NOT_FOUND, format!("Unknown tool: {name}"))
        }
        Err(DispatchError::InvalidArguments { tool, reason }) => error_response(
            id,
            INVALID_PARAMS,
            format!("Invalid params for {tool}: {reason}"),
        ),
    }
}

fn ok_response(id: Value, result: Value) -> Value {
    to_value(JsonRpcResponse::new(id, result))
}

fn error_response(id: Value, code: i32, message: String) -> Value {
    to_value(JsonRpcErrorResponse::new(id, code, message))
}

fn to_value<T: Serialize>(response: T) -> Value {
    serde_json::to_value(response).unwrap_or_else(|e| {
        json!({
            "jsonrpc": "2.0",
            "id": Value::Null,
            "error": { "code": INTERNAL_ERROR, "message": format!("failed to serialize response: {e}") }
        })
    })
}
