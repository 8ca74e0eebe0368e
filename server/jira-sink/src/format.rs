//! Rendering log records into ticket descriptions and comment bodies.

use crate::types::LogRecord;

/// Renders records into display text. The logging pipeline may supply its
/// own; [`LineFormatter`] is the default.
pub trait Formatter {
  fn format_record(&self, record: &LogRecord) -> String;

  fn format_batch(&self, records: &[LogRecord]) -> String {
    records
      .iter()
      .map(|r| self.format_record(r))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// One line per record: `2025-01-15T10:30:00+00:00 ERROR: message {"k":"v"}`.
/// Context is omitted when empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter;

impl Formatter for LineFormatter {
  fn format_record(&self, record: &LogRecord) -> String {
    let mut line = format!(
      "{} {}: {}",
      record.datetime.to_rfc3339(),
      record.level_name,
      record.message
    );
    if !record.context.is_empty() {
      line.push(' ');
      line.push_str(&serde_json::Value::Object(record.context.clone()).to_string());
    }
    line
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Level;
  use chrono::{TimeZone, Utc};
  use serde_json::json;

  fn rec(message: &str) -> LogRecord {
    let mut r = LogRecord::new(Level::Error, message);
    r.datetime = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
    r
  }

  #[test]
  fn line_without_context() {
    let line = LineFormatter.format_record(&rec("DB timeout"));
    assert_eq!(line, "2025-01-15T10:30:00+00:00 ERROR: DB timeout");
  }

  #[test]
  fn line_with_context() {
    let mut r = rec("DB timeout");
    r.context.insert("host".into(), json!("web-3"));
    let line = LineFormatter.format_record(&r);
    assert!(line.ends_with(r#"{"host":"web-3"}"#));
  }

  #[test]
  fn batch_joins_with_newlines() {
    let records = vec![rec("a"), rec("b")];
    let out = LineFormatter.format_batch(&records);
    assert_eq!(out.lines().count(), 2);
  }
}
