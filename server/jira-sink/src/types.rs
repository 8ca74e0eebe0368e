//! Core types for the Jira sink (log record model + Jira wire contracts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Severity levels
// ---------------------------------------------------------------------------

/// Log severity with Monolog-compatible ordinals. Ord follows the ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Debug,
  Info,
  Notice,
  Warning,
  Error,
  Critical,
  Alert,
  Emergency,
}

impl Level {
  /// Numeric ordinal as used by the logging pipeline's wire format.
  pub fn ordinal(self) -> u16 {
    match self {
      Self::Debug => 100,
      Self::Info => 200,
      Self::Notice => 250,
      Self::Warning => 300,
      Self::Error => 400,
      Self::Critical => 500,
      Self::Alert => 550,
      Self::Emergency => 600,
    }
  }

  /// Canonical upper-case name, used for ticket summaries.
  pub fn name(self) -> &'static str {
    match self {
      Self::Debug => "DEBUG",
      Self::Info => "INFO",
      Self::Notice => "NOTICE",
      Self::Warning => "WARNING",
      Self::Error => "ERROR",
      Self::Critical => "CRITICAL",
      Self::Alert => "ALERT",
      Self::Emergency => "EMERGENCY",
    }
  }

  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "debug" => Some(Self::Debug),
      "info" => Some(Self::Info),
      "notice" => Some(Self::Notice),
      "warning" | "warn" => Some(Self::Warning),
      "error" | "err" => Some(Self::Error),
      "critical" | "crit" => Some(Self::Critical),
      "alert" => Some(Self::Alert),
      "emergency" | "fatal" => Some(Self::Emergency),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Log record
// ---------------------------------------------------------------------------

/// One log event as delivered by the logging pipeline.
///
/// `datetime`, `context` and `formatted` are volatile and never feed the
/// fingerprint; `formatted` is filled by the sink's formatter on its own copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
  pub level: Level,
  #[serde(default)]
  pub level_name: String,
  pub message: String,
  pub datetime: DateTime<Utc>,
  #[serde(default)]
  pub context: Map<String, Value>,
  #[serde(default)]
  pub formatted: Option<String>,
}

impl LogRecord {
  pub fn new(level: Level, message: impl Into<String>) -> Self {
    Self {
      level,
      level_name: level.name().to_string(),
      message: message.into(),
      datetime: Utc::now(),
      context: Map::new(),
      formatted: None,
    }
  }

  /// Fill an empty `level_name` from the level. Records parsed from JSON may
  /// omit it; the fingerprint depends on it being populated consistently.
  pub fn normalize(mut self) -> Self {
    if self.level_name.is_empty() {
      self.level_name = self.level.name().to_string();
    }
    self
  }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// A stable hex string identifying one error shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl std::fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ---------------------------------------------------------------------------
// Jira wire types (JSON contracts of the v2 REST endpoints we touch)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
  pub id: String,
  pub name: String,
}

/// Page wrapper returned by `GET /rest/api/2/customFields`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldPage {
  #[serde(default)]
  pub values: Vec<CustomField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
  pub total: u64,
  #[serde(default)]
  pub issues: Vec<Issue>,
}

/// A matched issue. `fields` stays dynamic: custom field keys are only known
/// at runtime after resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
  pub id: String,
  #[serde(default)]
  pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeta {
  #[serde(default)]
  pub projects: Vec<ProjectMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
  pub id: String,
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub issuetypes: Vec<IssueTypeMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeMeta {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
  pub id: String,
  #[serde(default)]
  pub key: Option<String>,
}
