// Tool descriptions, argument shapes and dispatch
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use time_engine::Clock;

use crate::datetime::{calculate_time_difference, get_current_datetime};
use crate::meeting::{download_meeting_data, MeetingRequest, ReadAiClient};
use crate::status::util_server_status;

pub const GET_CURRENT_DATETIME: &str = "get_current_datetime";
pub const CALCULATE_TIME_DIFFERENCE: &str = "calculate_time_difference";
pub const DOWNLOAD_MEETING_DATA: &str = "download_meeting_data";
pub const UTIL_SERVER_STATUS: &str = "util_server_status";

/// Every tool with a one-line summary, in listing order.
pub const TOOLS: &[(&str, &str)] = &[
    (
        GET_CURRENT_DATETIME,
        "Current date and time in any timezone and format",
    ),
    (
        CALCULATE_TIME_DIFFERENCE,
        "Elapsed time between two timestamps (or one timestamp and now)",
    ),
    (
        DOWNLOAD_MEETING_DATA,
        "Download Read.AI meeting transcripts and summaries",
    ),
    (
        UTIL_SERVER_STATUS,
        "Check utility server status and configuration",
    ),
];

/// Text result of one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolText {
    pub text: String,
    pub is_error: bool,
}

impl ToolText {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// MCP `tools/call` result body.
    pub fn to_result(&self) -> Value {
        json!({
            "content": [
                {
                    "type": "text",
                    "text": self.text
                }
            ],
            "isError": self.is_error
        })
    }
}

/// State shared by every tool call. Read-only after startup.
pub struct ToolContext {
    pub clock: Box<dyn Clock>,
    pub read_ai: ReadAiClient,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CurrentDatetimeArgs {
    timezone: String,
    format: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct TimeDifferenceArgs {
    start_time: String,
    end_time: String,
    timezone: String,
}

#[derive(Deserialize, Debug)]
struct MeetingArgs {
    meeting_id: String,
    #[serde(default = "default_true")]
    include_transcript: bool,
    #[serde(default = "default_true")]
    include_summary: bool,
}

fn default_true() -> bool {
    true
}

/// Why a tool call could not be dispatched.
#[derive(Debug)]
pub enum DispatchError {
    UnknownTool(String),
    InvalidArguments { tool: String, reason: String },
}

/// Run the named tool with its JSON arguments.
pub fn call_tool(ctx: &ToolContext, name: &str, arguments: Value) -> Result<ToolText, DispatchError> {
    match name {
        GET_CURRENT_DATETIME => {
            let args: CurrentDatetimeArgs = parse_args(name, arguments)?;
            Ok(get_current_datetime(
                or_default(&args.timezone, "UTC"),
                or_default(&args.format, "iso"),
                ctx.clock.as_ref(),
            ))
        }
        CALCULATE_TIME_DIFFERENCE => {
            let args: TimeDifferenceArgs = parse_args(name, arguments)?;
            Ok(calculate_time_difference(
                &args.start_time,
                &args.end_time,
                or_default(&args.timezone, "UTC"),
                ctx.clock.as_ref(),
            ))
        }
        DOWNLOAD_MEETING_DATA => {
            let args: MeetingArgs = parse_args(name, arguments)?;
            let request = MeetingRequest {
                meeting_id: &args.meeting_id,
                include_transcript: args.include_transcript,
                include_summary: args.include_summary,
            };
            Ok(download_meeting_data(&ctx.read_ai, &request))
        }
        UTIL_SERVER_STATUS => Ok(ToolText::ok(util_server_status(&ctx.read_ai))),
        other => Err(DispatchError::UnknownTool(other.to_string())),
    }
}

/// Missing or `null` arguments deserialize from an empty object.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, DispatchError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| DispatchError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Blank strings mean "not supplied".
fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

pub fn get_tools_description_json() -> Value {
    json!([
        {
            "name": GET_CURRENT_DATETIME,
            "description": "Get the current date and time in a timezone, rendered as iso, readable, timestamp or custom",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "timezone": {
                        "type": "string",
                        "description": "IANA timezone name (e.g., 'UTC', 'America/Sao_Paulo'). Defaults to UTC"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["iso", "readable", "timestamp", "custom"],
                        "description": "Output format. Defaults to iso; unknown values fall back to iso"
                    }
                }
            },
            "annotations": {
                "title": "Get Current DateTime",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": false,
                "openWorldHint": false
            }
        },
        {
            "name": CALCULATE_TIME_DIFFERENCE,
            "description": "Calculate the elapsed time between two timestamps; end defaults to now",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "start_time": {
                        "type": "string",
                        "description": "Start timestamp: YYYY-MM-DD HH:MM:SS, YYYY-MM-DD HH:MM, YYYY-MM-DD or RFC 3339"
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End timestamp in the same formats. Empty means now"
                    },
                    "timezone": {
                        "type": "string",
                        "description": "IANA timezone used to read timestamps without an offset. Defaults to UTC"
                    }
                },
                "required": ["start_time"]
            },
            "annotations": {
                "title": "Calculate Time Difference",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": false,
                "openWorldHint": false
            }
        },
        {
            "name": DOWNLOAD_MEETING_DATA,
            "description": "Download meeting transcript and/or summary from Read.AI",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "meeting_id": {
                        "type": "string",
                        "description": "Read.AI meeting ID"
                    },
                    "include_transcript": {
                        "type": "boolean",
                        "description": "Whether to download the full transcript (default: true)"
                    },
                    "include_summary": {
                        "type": "boolean",
                        "description": "Whether to download the meeting summary (default: true)"
                    }
                },
                "required": ["meeting_id"]
            },
            "annotations": {
                "title": "Download Meeting Data",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": UTIL_SERVER_STATUS,
            "description": "Check the status of all utility server integrations",
            "inputSchema": {
                "type": "object",
                "properties": {}
            },
            "annotations": {
                "title": "Utility Server Status",
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": false
            }
        }
    ])
}
