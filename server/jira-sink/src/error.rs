//! Structured error types for the Jira sink.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
  /// Network/HTTP failure at any remote call. Not retried here; retries
  /// belong to the transport collaborator.
  #[error("transport: {0}")]
  Transport(#[from] reqwest::Error),

  /// The tracker answered with a non-success status.
  #[error("api error (status {status}): {message}")]
  Api { status: u16, message: String },

  /// Response body was not the expected JSON shape.
  #[error("deserialize: {0}")]
  Deserialize(String),

  /// A configured field/project/issue-type name does not exist in the
  /// tracker's schema. Fatal for the current send; signals misconfiguration.
  #[error("{kind} not found: {name}")]
  NotFound { kind: &'static str, name: String },

  #[error("config: {0}")]
  Config(String),
}

impl SinkError {
  pub fn api(status: u16, message: impl Into<String>) -> Self {
    Self::Api {
      status,
      message: message.into(),
    }
  }

  pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
    Self::NotFound {
      kind,
      name: name.into(),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}
