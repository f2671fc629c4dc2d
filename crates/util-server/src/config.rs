// Command-line and environment configuration
use clap::Parser;

use crate::meeting::{ReadAiConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "util-server", author, version, about, long_about = None)]
pub struct Config {
    /// Read.AI API key; live meeting downloads are disabled without it
    #[arg(long, env = "READ_AI_API_KEY", hide_env_values = true)]
    pub read_ai_api_key: Option<String>,

    /// Read.AI API base URL
    #[arg(long, env = "READ_AI_API_URL", default_value = DEFAULT_BASE_URL)]
    pub read_ai_api_url: String,

    /// Log filter directive (tracing EnvFilter syntax), written to stderr
    #[arg(long, env = "UTIL_SERVER_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn read_ai(&self) -> ReadAiConfig {
        ReadAiConfig {
            api_key: self
                .read_ai_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: self.read_ai_api_url.clone(),
        }
    }
}
