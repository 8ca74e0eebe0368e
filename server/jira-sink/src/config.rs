//! Sink configuration.

use crate::error::SinkError;
use crate::types::Level;

/// Connection + upsert behavior for one Jira sink.
#[derive(Debug, Clone)]
pub struct Config {
  /// Jira hostname, no scheme (e.g. "company.atlassian.net").
  pub hostname: String,
  pub username: String,
  pub password: String,
  /// Base JQL filter; the dedup search ANDs the fingerprint condition onto it.
  pub jql: String,
  /// Custom field (by name) that stores the fingerprint on each ticket.
  pub hash_field_name: String,
  pub project_key: String,
  /// Issue type (by name) used when creating tickets.
  pub issue_type_name: String,
  /// Append the batch rendering as a comment on repeat occurrences.
  pub with_comments: bool,
  /// Custom field (by name) holding the occurrence counter; `None` disables
  /// counter increments.
  pub counter_field_name: Option<String>,
  /// Minimum severity this sink accepts.
  pub level: Level,
  /// Whether handled records should still propagate to further handlers.
  pub bubble: bool,
}

impl Config {
  pub fn new(
    hostname: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    jql: impl Into<String>,
    hash_field_name: impl Into<String>,
    project_key: impl Into<String>,
    issue_type_name: impl Into<String>,
  ) -> Self {
    Self {
      hostname: hostname.into(),
      username: username.into(),
      password: password.into(),
      jql: jql.into(),
      hash_field_name: hash_field_name.into(),
      project_key: project_key.into(),
      issue_type_name: issue_type_name.into(),
      with_comments: false,
      counter_field_name: None,
      level: Level::Debug,
      bubble: true,
    }
  }

  /// Read configuration from `JIRA_SINK_*` environment variables (binary use).
  pub fn from_env() -> Result<Self, SinkError> {
    fn required(key: &str) -> Result<String, SinkError> {
      std::env::var(key).map_err(|_| SinkError::Config(format!("missing env var {}", key)))
    }

    let mut config = Self::new(
      required("JIRA_SINK_HOSTNAME")?,
      required("JIRA_SINK_USERNAME")?,
      required("JIRA_SINK_PASSWORD")?,
      required("JIRA_SINK_JQL")?,
      required("JIRA_SINK_HASH_FIELD")?,
      required("JIRA_SINK_PROJECT_KEY")?,
      required("JIRA_SINK_ISSUE_TYPE")?,
    );

    if let Ok(v) = std::env::var("JIRA_SINK_WITH_COMMENTS") {
      config.with_comments = v == "1" || v.eq_ignore_ascii_case("true");
    }
    if let Ok(v) = std::env::var("JIRA_SINK_COUNTER_FIELD") {
      if !v.is_empty() {
        config.counter_field_name = Some(v);
      }
    }
    if let Ok(v) = std::env::var("JIRA_SINK_LEVEL") {
      config.level = Level::from_str_loose(&v)
        .ok_or_else(|| SinkError::Config(format!("invalid JIRA_SINK_LEVEL: {}", v)))?;
    }

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_applies_defaults() {
    let config = Config::new("jira.local", "bot", "s3cret", "project = OPS", "Hash", "OPS", "Bug");
    assert!(!config.with_comments);
    assert!(config.counter_field_name.is_none());
    assert_eq!(config.level, Level::Debug);
    assert!(config.bubble);
  }
}
