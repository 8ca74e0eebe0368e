//! Binary entrypoint: read LogRecord JSON lines from stdin, upsert tickets.
//!
//! Each input line is one LogRecord. Invalid lines and failed sends are
//! logged and skipped; the stream keeps going. Configuration comes from
//! `JIRA_SINK_*` environment variables.

use std::io::{self, BufRead};

use jira_sink::{Config, JiraHandler, LogRecord};
use tracing::error;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let config = match Config::from_env() {
    Ok(c) => c,
    Err(e) => {
      error!("jira-sink: {}", e);
      std::process::exit(1);
    }
  };
  let mut handler = JiraHandler::new(config);

  let stdin = io::stdin();
  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        error!("jira-sink: read error: {}", e);
        std::process::exit(1);
      }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let record: LogRecord = match serde_json::from_str(trimmed) {
      Ok(r) => r,
      Err(e) => {
        error!("jira-sink: json parse: {}", e);
        continue;
      }
    };

    if let Err(e) = handler.handle(record.normalize()).await {
      error!("jira-sink: send failed: {}", e);
    }
  }
}
