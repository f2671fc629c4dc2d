//! Read.AI meeting downloads.
//!
//! Live requests need an API key. Without one the tool reports the missing
//! configuration and attaches canned mock data so the agent side can still
//! be exercised.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::tools::ToolText;

pub const DEFAULT_BASE_URL: &str = "https://api.read.ai/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum MeetingError {
    #[error("Read.AI API key not configured")]
    NotConfigured,

    #[error("Invalid Read.AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Read.AI API error: {status}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ReadAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// What to fetch for one meeting.
#[derive(Debug, Clone, Copy)]
pub struct MeetingRequest<'a> {
    pub meeting_id: &'a str,
    pub include_transcript: bool,
    pub include_summary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingData {
    pub meeting_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
}

pub struct ReadAiClient {
    config: ReadAiConfig,
    http: Client,
}

impl ReadAiClient {
    pub fn new(config: ReadAiConfig) -> Result<Self, MeetingError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, http })
    }

    pub fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Download the requested parts of a meeting.
    pub fn fetch(&self, request: &MeetingRequest<'_>) -> Result<MeetingData, MeetingError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MeetingError::NotConfigured)?;

        let mut data = MeetingData {
            meeting_id: request.meeting_id.to_string(),
            transcript: None,
            summary: None,
        };

        if request.include_transcript {
            data.transcript = Some(self.get_json(api_key, request.meeting_id, "transcript")?);
        }
        if request.include_summary {
            data.summary = Some(self.get_json(api_key, request.meeting_id, "summary")?);
        }

        Ok(data)
    }

    /// `{base}/meetings/{id}/{resource}` with each segment percent-encoded.
    fn endpoint(&self, meeting_id: &str, resource: &str) -> Result<Url, MeetingError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| MeetingError::InvalidBaseUrl(format!("'{}': {}", self.config.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| MeetingError::InvalidBaseUrl(format!("'{}'", self.config.base_url)))?
            .pop_if_empty()
            .extend(["meetings", meeting_id, resource]);
        Ok(url)
    }

    fn get_json(
        &self,
        api_key: &str,
        meeting_id: &str,
        resource: &str,
    ) -> Result<Value, MeetingError> {
        let url = self.endpoint(meeting_id, resource)?;
        debug!(%url, "fetching Read.AI resource");

        let response = self
            .http
            .get(url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), meeting_id, resource, "Read.AI request rejected");
            return Err(MeetingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

/// Canned meeting used when no API key is configured.
pub fn mock_data(request: &MeetingRequest<'_>) -> MeetingData {
    MeetingData {
        meeting_id: request.meeting_id.to_string(),
        transcript: request.include_transcript.then(|| {
            json!({
                "segments": [
                    {"speaker": "Alice", "timestamp": "00:00",
                     "text": "Good morning everyone, let's start our standup."},
                    {"speaker": "Bob", "timestamp": "00:30",
                     "text": "I completed the API integration yesterday."},
                    {"speaker": "Carol", "timestamp": "01:00",
                     "text": "Great! I'm working on the frontend components."}
                ]
            })
        }),
        summary: request.include_summary.then(|| {
            json!({
                "key_points": [
                    "Team standup meeting held",
                    "Bob completed API integration",
                    "Carol working on frontend components"
                ],
                "action_items": [
                    "Carol to complete frontend by Friday",
                    "Bob to review Carol's code"
                ],
                "duration_minutes": 15,
                "participant_count": 3
            })
        }),
    }
}

/// The `download_meeting_data` tool.
pub fn download_meeting_data(client: &ReadAiClient, request: &MeetingRequest<'_>) -> ToolText {
    match client.fetch(request) {
        Ok(data) => ToolText::ok(render_meeting(&data)),
        Err(err) => ToolText::error(render_failure(request, &err)),
    }
}

/// Render a downloaded meeting as text.
pub fn render_meeting(data: &MeetingData) -> String {
    let mut out = format!("✅ Meeting Data Downloaded: {}\n", data.meeting_id);
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    if let Some(transcript) = &data.transcript {
        out.push_str("## Transcript\n");
        match transcript.get("segments").and_then(Value::as_array) {
            Some(segments) => {
                for segment in segments {
                    out.push_str(&format!(
                        "[{}] {}: {}\n",
                        str_field(segment, "timestamp", "??:??"),
                        str_field(segment, "speaker", "Speaker"),
                        str_field(segment, "text", ""),
                    ));
                }
            }
            None => out.push_str(&pretty(transcript)),
        }
        out.push('\n');
    }

    if let Some(summary) = &data.summary {
        out.push_str("## Summary\n");
        render_summary(summary, &mut out);
    }

    out
}

fn render_summary(summary: &Value, out: &mut String) {
    let key_points = summary.get("key_points").and_then(Value::as_array);
    let action_items = summary.get("action_items").and_then(Value::as_array);

    if let Some(points) = key_points {
        out.push_str("**Key Points:**\n");
        push_bullets(points, out);
    }
    if let Some(items) = action_items {
        out.push_str("**Action Items:**\n");
        push_bullets(items, out);
    }
    if let Some(minutes) = summary.get("duration_minutes") {
        out.push_str(&format!("**Duration:** {} minutes\n", scalar(minutes)));
    }
    if let Some(count) = summary.get("participant_count") {
        out.push_str(&format!("**Participants:** {}\n", scalar(count)));
    }

    // Unknown structure: show it raw
    if key_points.is_none() && action_items.is_none() {
        out.push_str(&pretty(summary));
        out.push('\n');
    }
}

/// Render a failed download, including mock data when unconfigured.
pub fn render_failure(request: &MeetingRequest<'_>, err: &MeetingError) -> String {
    let mut out = format!("❌ Error downloading meeting {}:\n", request.meeting_id);
    out.push_str(&format!("   {err}\n"));

    match err {
        MeetingError::NotConfigured => {
            out.push_str("   Configuration: Set READ_AI_API_KEY environment variable\n");
            out.push_str("\n📝 Mock data for development:\n");
            out.push_str(&pretty(&mock_data(request)));
        }
        MeetingError::Status { body, .. } if !body.is_empty() => {
            out.push_str(&format!("   Details: {body}\n"));
        }
        _ => {}
    }

    out
}

fn push_bullets(items: &[Value], out: &mut String) {
    for item in items {
        out.push_str(&format!("- {}\n", scalar(item)));
    }
    out.push('\n');
}

fn str_field<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Strings without quotes, everything else as JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
