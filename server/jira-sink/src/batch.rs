//! Severity filtering and representative-record selection for batches.

use crate::types::{Level, LogRecord};

/// Keep only records at or above the minimum level, preserving order.
pub fn filter_by_level(records: &[LogRecord], min: Level) -> Vec<LogRecord> {
  records
    .iter()
    .filter(|r| r.level >= min)
    .cloned()
    .collect()
}

/// The record with the maximum level; first-wins on ties. `None` on empty
/// input — callers must not hand an empty batch to the upsert engine.
pub fn highest_record(records: &[LogRecord]) -> Option<&LogRecord> {
  let mut highest: Option<&LogRecord> = None;
  for record in records {
    if highest.map_or(true, |h| record.level > h.level) {
      highest = Some(record);
    }
  }
  highest
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(level: Level, message: &str) -> LogRecord {
    LogRecord::new(level, message)
  }

  #[test]
  fn filter_drops_below_threshold() {
    let records = vec![
      rec(Level::Debug, "a"),
      rec(Level::Error, "b"),
      rec(Level::Warning, "c"),
    ];
    let kept = filter_by_level(&records, Level::Warning);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].message, "b");
    assert_eq!(kept[1].message, "c");
  }

  #[test]
  fn filter_can_empty_a_batch() {
    let records = vec![rec(Level::Debug, "a"), rec(Level::Info, "b")];
    assert!(filter_by_level(&records, Level::Error).is_empty());
  }

  #[test]
  fn highest_picks_max_level() {
    let records = vec![
      rec(Level::Warning, "a"),
      rec(Level::Critical, "b"),
      rec(Level::Error, "c"),
    ];
    assert_eq!(highest_record(&records).unwrap().message, "b");
  }

  #[test]
  fn highest_is_first_wins_on_ties() {
    let records = vec![
      rec(Level::Error, "first"),
      rec(Level::Error, "second"),
      rec(Level::Warning, "third"),
    ];
    assert_eq!(highest_record(&records).unwrap().message, "first");
  }

  #[test]
  fn highest_of_empty_is_none() {
    assert!(highest_record(&[]).is_none());
  }
}
