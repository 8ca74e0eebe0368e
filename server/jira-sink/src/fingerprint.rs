//! Stable fingerprint computation for deduplicating tickets.

use crate::types::{Fingerprint, LogRecord};

/// Compute a stable fingerprint from a log record.
///
/// Hashes only the stable fields (level ordinal, level name, message);
/// `datetime`, `formatted` and `context` are volatile and excluded so that
/// re-occurrences of the same error shape hash identically. Uses blake3 for a
/// fast, deterministic hash; this is not a security boundary.
pub fn compute(record: &LogRecord) -> Fingerprint {
  let mut hasher = blake3::Hasher::new();
  hasher.update(&record.level.ordinal().to_be_bytes());
  hasher.update(b"|");
  hasher.update(record.level_name.as_bytes());
  hasher.update(b"|");
  hasher.update(record.message.as_bytes());

  // First 16 bytes (32 hex chars) is compact but plenty for dedup.
  let hex = hasher.finalize().to_hex();
  Fingerprint(hex[..32].to_string())
}
