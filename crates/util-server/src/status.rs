// Status report for the util_server_status tool
use crate::handlers::{PROTOCOL_VERSION, SERVER_NAME};
use crate::meeting::ReadAiClient;
use crate::tools::TOOLS;

pub fn util_server_status(read_ai: &ReadAiClient) -> String {
    let mut status = String::from("Utility Server Status\n===================\n\n");

    status.push_str("**Read.AI Meeting Downloader**\n");
    status.push_str(&format!(
        "- Available: {}\n",
        if read_ai.is_available() {
            "✅ Yes"
        } else {
            "❌ No (API key needed)"
        }
    ));
    status.push_str(&format!("- API Base URL: {}\n", read_ai.base_url()));
    if !read_ai.is_available() {
        status.push_str("- Configuration: Set READ_AI_API_KEY environment variable\n");
        status.push_str("- Development: Mock data available for testing\n");
    }
    status.push('\n');

    status.push_str("**Server Information**\n");
    status.push_str(&format!(
        "- Server: {SERVER_NAME} {}\n",
        env!("CARGO_PKG_VERSION")
    ));
    status.push_str(&format!(
        "- Framework: MCP {PROTOCOL_VERSION} (JSON-RPC 2.0 over stdio)\n"
    ));
    status.push_str(&format!("- Tools Available: {}\n", TOOLS.len()));
    status.push_str("- Purpose: General-purpose utilities for productivity\n\n");

    status.push_str("**Available Tools**\n");
    for (i, (name, summary)) in TOOLS.iter().enumerate() {
        status.push_str(&format!("{}. `{name}` - {summary}\n", i + 1));
    }

    status
}
