//! Jira Dedup Sink — log batches in, deduplicated tickets out.
//!
//! Filters records by severity, fingerprints each batch's highest-severity
//! record over its stable fields, and upserts against Jira: an existing
//! ticket with that fingerprint gets a counter bump and/or a comment, a
//! missing one is created from name-resolved schema metadata.
//!
//! Strictly sequential per send; no retries and no cross-send state beyond
//! the remote tickets themselves.

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod handler;
pub mod resolve;
pub mod types;

pub use client::{IssueTracker, JiraClient};
pub use config::Config;
pub use error::SinkError;
pub use format::{Formatter, LineFormatter};
pub use handler::JiraHandler;
pub use types::{Fingerprint, Level, LogRecord};
