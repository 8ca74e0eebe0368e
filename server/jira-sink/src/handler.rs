//! The batch-accumulation + ticket-upsert handler.
//!
//! One `send` is one upsert: fingerprint the batch's representative record,
//! search the tracker for a ticket carrying that fingerprint, then either
//! bump/comment the existing ticket or create a new one from resolved
//! schema metadata. Strictly sequential; no retries at this layer.

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::batch;
use crate::client::{IssueTracker, JiraClient};
use crate::config::Config;
use crate::error::SinkError;
use crate::fingerprint;
use crate::format::{Formatter, LineFormatter};
use crate::resolve;
use crate::types::LogRecord;

pub struct JiraHandler<T: IssueTracker> {
  config: Config,
  tracker: T,
  formatter: Box<dyn Formatter + Send + Sync>,
  created_issue_id: Option<String>,
}

impl JiraHandler<JiraClient> {
  /// Handler talking to the real Jira instance named in the config.
  pub fn new(config: Config) -> Self {
    let tracker = JiraClient::new(&config.hostname, &config.username, &config.password);
    Self::with_tracker(config, tracker)
  }
}

impl<T: IssueTracker> JiraHandler<T> {
  /// Handler with an explicit tracker implementation (tests, other trackers).
  pub fn with_tracker(config: Config, tracker: T) -> Self {
    Self {
      config,
      tracker,
      formatter: Box::new(LineFormatter),
      created_issue_id: None,
    }
  }

  pub fn with_formatter(mut self, formatter: impl Formatter + Send + Sync + 'static) -> Self {
    self.formatter = Box::new(formatter);
    self
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Id of the ticket created by the most recent send, if that send took the
  /// create path.
  pub fn created_issue_id(&self) -> Option<&str> {
    self.created_issue_id.as_deref()
  }

  /// Handle one record; equivalent to a one-element batch.
  ///
  /// Returns whether propagation to further handlers should stop: `false`
  /// when the record is below this sink's level (not consumed), otherwise
  /// `!bubble`.
  pub async fn handle(&mut self, record: LogRecord) -> Result<bool, SinkError> {
    if record.level < self.config.level {
      return Ok(false);
    }
    self.handle_batch(vec![record]).await?;
    Ok(!self.config.bubble)
  }

  /// Filter a batch by severity and upsert one ticket for the survivors.
  /// An entirely filtered-out batch makes no network calls.
  pub async fn handle_batch(&mut self, records: Vec<LogRecord>) -> Result<(), SinkError> {
    let mut kept = batch::filter_by_level(&records, self.config.level);
    if kept.is_empty() {
      return Ok(());
    }

    for record in &mut kept {
      record.formatted = Some(self.formatter.format_record(record));
    }
    let content = self.formatter.format_batch(&kept);
    self.send(&content, &kept).await
  }

  async fn send(&mut self, content: &str, records: &[LogRecord]) -> Result<(), SinkError> {
    // Guard: callers filter first, so this only trips on misuse.
    let highest = match batch::highest_record(records) {
      Some(r) => r,
      None => return Ok(()),
    };

    let fp = fingerprint::compute(highest);
    debug!(fingerprint = %fp, level = %highest.level_name, "upserting ticket");

    let custom_fields = self.tracker.custom_fields().await?;
    let hash_field_id = resolve::custom_field_id(&custom_fields, &self.config.hash_field_name)?;
    let counter_field_id = match &self.config.counter_field_name {
      Some(name) => Some(resolve::custom_field_id(&custom_fields, name)?),
      None => None,
    };

    let jql = format!(
      "{} AND {} ~ '{}'",
      self.config.jql, self.config.hash_field_name, fp
    );
    let mut search_fields: Vec<String> = vec![
      "issuetype".into(),
      "status".into(),
      "summary".into(),
      hash_field_id.to_string(),
    ];
    if let Some(id) = counter_field_id {
      search_fields.push(id.to_string());
    }

    let result = self.tracker.search(&jql, &search_fields).await?;

    if result.total > 0 {
      let issue = result
        .issues
        .first()
        .ok_or_else(|| SinkError::Deserialize("search total > 0 but issues empty".into()))?;

      if let Some(counter_id) = counter_field_id {
        // Unset counter reads as 0; the update below makes it 1.
        let current = issue
          .fields
          .get(counter_id)
          .and_then(Value::as_i64)
          .unwrap_or(0);
        let mut fields = Map::new();
        fields.insert(counter_id.to_string(), json!(current + 1));
        self.tracker.update_issue_fields(&issue.id, fields).await?;
        info!(issue_id = %issue.id, count = current + 1, "incremented ticket counter");
      }

      if self.config.with_comments {
        self.tracker.add_comment(&issue.id, content).await?;
        debug!(issue_id = %issue.id, "appended occurrence comment");
      }

      return Ok(());
    }

    let meta = self.tracker.create_meta(&self.config.project_key).await?;
    let project = resolve::project(&meta, &self.config.project_key)?;
    let issue_type = resolve::issue_type(project, &self.config.issue_type_name)?;

    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "id": project.id }));
    fields.insert("issuetype".into(), json!({ "id": issue_type.id }));
    fields.insert(
      "summary".into(),
      json!(format!("{}: {}", highest.level_name, highest.message)),
    );
    fields.insert("description".into(), json!(content));
    fields.insert(hash_field_id.to_string(), json!(fp.0));
    if let Some(counter_id) = counter_field_id {
      fields.insert(counter_id.to_string(), json!(1));
    }

    let created = self.tracker.create_issue(fields).await?;
    info!(issue_id = %created.id, fingerprint = %fp, "created ticket");
    self.created_issue_id = Some(created.id);

    Ok(())
  }
}
