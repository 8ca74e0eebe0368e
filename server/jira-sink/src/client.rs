//! Jira REST API client (the v2 endpoints the upsert flow touches).

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::SinkError;
use crate::types::{CreateMeta, CreatedIssue, CustomField, CustomFieldPage, SearchResponse};

/// The outbound seam to the issue tracker. Implemented by [`JiraClient`] for
/// real traffic and by scripted mocks in tests.
#[async_trait]
pub trait IssueTracker: Send + Sync {
  /// `GET /rest/api/2/customFields` — name/id pairs for field resolution.
  async fn custom_fields(&self) -> Result<Vec<CustomField>, SinkError>;

  /// `POST /rest/api/2/search` — the dedup check.
  async fn search(&self, jql: &str, fields: &[String]) -> Result<SearchResponse, SinkError>;

  /// `PUT /rest/api/2/issue/{id}?notifyUsers=false` — field update, watchers
  /// not notified.
  async fn update_issue_fields(
    &self,
    issue_id: &str,
    fields: Map<String, Value>,
  ) -> Result<(), SinkError>;

  /// `POST /rest/api/2/issue/{id}/comment`.
  async fn add_comment(&self, issue_id: &str, body: &str) -> Result<(), SinkError>;

  /// `GET /rest/api/2/issue/createmeta` for one project, issue types and
  /// fields expanded.
  async fn create_meta(&self, project_key: &str) -> Result<CreateMeta, SinkError>;

  /// `POST /rest/api/2/issue`.
  async fn create_issue(&self, fields: Map<String, Value>) -> Result<CreatedIssue, SinkError>;
}

/// reqwest-backed Jira client. HTTP Basic on every request, JSON bodies.
/// Timeouts/TLS/socket retries belong to the supplied `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct JiraClient {
  base_url: String,
  username: String,
  password: String,
  client: Client,
}

impl JiraClient {
  pub fn new(
    hostname: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    Self::with_client(hostname, username, password, Client::new())
  }

  /// Use a preconfigured `reqwest::Client` (timeouts, proxies, TLS).
  pub fn with_client(
    hostname: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    client: Client,
  ) -> Self {
    Self {
      base_url: format!("https://{}", hostname.into().trim_end_matches('/')),
      username: username.into(),
      password: password.into(),
      client,
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn get(&self, url: &str) -> reqwest::RequestBuilder {
    self
      .client
      .get(url)
      .basic_auth(&self.username, Some(&self.password))
  }

  fn post(&self, url: &str) -> reqwest::RequestBuilder {
    self
      .client
      .post(url)
      .basic_auth(&self.username, Some(&self.password))
  }

  fn put(&self, url: &str) -> reqwest::RequestBuilder {
    self
      .client
      .put(url)
      .basic_auth(&self.username, Some(&self.password))
  }

  async fn handle_response<T: DeserializeOwned>(
    &self,
    response: reqwest::Response,
  ) -> Result<T, SinkError> {
    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_else(|_| "unknown error".into());
      return Err(SinkError::api(status.as_u16(), message));
    }
    response
      .json()
      .await
      .map_err(|e| SinkError::Deserialize(e.to_string()))
  }

  async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), SinkError> {
    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_else(|_| "unknown error".into());
      return Err(SinkError::api(status.as_u16(), message));
    }
    Ok(())
  }
}

#[async_trait]
impl IssueTracker for JiraClient {
  async fn custom_fields(&self) -> Result<Vec<CustomField>, SinkError> {
    let url = format!("{}/rest/api/2/customFields", self.base_url);
    let response = self.get(&url).send().await?;
    let page: CustomFieldPage = self.handle_response(response).await?;
    Ok(page.values)
  }

  async fn search(&self, jql: &str, fields: &[String]) -> Result<SearchResponse, SinkError> {
    let url = format!("{}/rest/api/2/search", self.base_url);
    let response = self
      .post(&url)
      .json(&json!({ "jql": jql, "fields": fields }))
      .send()
      .await?;
    self.handle_response(response).await
  }

  async fn update_issue_fields(
    &self,
    issue_id: &str,
    fields: Map<String, Value>,
  ) -> Result<(), SinkError> {
    let url = format!(
      "{}/rest/api/2/issue/{}?notifyUsers=false",
      self.base_url, issue_id
    );
    let response = self
      .put(&url)
      .json(&json!({ "fields": fields }))
      .send()
      .await?;
    self.handle_empty_response(response).await
  }

  async fn add_comment(&self, issue_id: &str, body: &str) -> Result<(), SinkError> {
    let url = format!("{}/rest/api/2/issue/{}/comment", self.base_url, issue_id);
    let response = self.post(&url).json(&json!({ "body": body })).send().await?;
    self.handle_empty_response(response).await
  }

  async fn create_meta(&self, project_key: &str) -> Result<CreateMeta, SinkError> {
    let url = format!("{}/rest/api/2/issue/createmeta", self.base_url);
    let response = self
      .get(&url)
      .query(&[
        ("projectKeys", project_key),
        ("expand", "projects.issuetypes.fields"),
      ])
      .send()
      .await?;
    self.handle_response(response).await
  }

  async fn create_issue(&self, fields: Map<String, Value>) -> Result<CreatedIssue, SinkError> {
    let url = format!("{}/rest/api/2/issue", self.base_url);
    let response = self
      .post(&url)
      .json(&json!({ "fields": fields }))
      .send()
      .await?;
    self.handle_response(response).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_url_has_scheme_and_no_trailing_slash() {
    let client = JiraClient::new("jira.example.com/", "bot", "s3cret");
    assert_eq!(client.base_url(), "https://jira.example.com");
  }
}
