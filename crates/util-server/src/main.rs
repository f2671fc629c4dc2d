mod config;
mod datetime;
mod handlers;
mod meeting;
mod rpc;
mod status;
mod tools;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use time_engine::SystemClock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use meeting::ReadAiClient;
use tools::ToolContext;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level)?;

    let read_ai =
        ReadAiClient::new(config.read_ai()).context("failed to build Read.AI HTTP client")?;
    info!(
        read_ai_available = read_ai.is_available(),
        "util-server listening on stdio"
    );

    let ctx = ToolContext {
        clock: Box::new(SystemClock),
        read_ai,
    };

    serve(&ctx, io::stdin().lock(), io::stdout().lock())?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Logs go to stderr; stdout carries protocol messages only.
fn init_tracing(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Read newline-delimited JSON-RPC messages until EOF, answering each on `writer`.
fn serve<R: BufRead, W: Write>(ctx: &ToolContext, reader: R, mut writer: W) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Value>(&line) {
            Ok(Value::Array(batch)) if batch.is_empty() => {
                warn!("empty batch on stdin");
                Some(handlers::invalid_request(Value::Null))
            }
            Ok(Value::Array(batch)) => {
                let replies: Vec<Value> = batch
                    .into_iter()
                    .filter_map(|message| handlers::handle_message(ctx, message))
                    .collect();
                (!replies.is_empty()).then_some(Value::Array(replies))
            }
            Ok(message) => handlers::handle_message(ctx, message),
            Err(e) => {
                warn!(error = %e, "invalid JSON on stdin");
                Some(handlers::parse_error(Value::Null))
            }
        };

        if let Some(reply) = reply {
            serde_json::to_writer(&mut writer, &reply).context("failed to write response")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    Ok(())
}
