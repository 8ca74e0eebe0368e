//! Name-keyed lookups against Jira schema listings.
//!
//! Field/project/issue-type names are operator-configured and expected to
//! exist; a miss is misconfiguration, reported as `SinkError::NotFound` rather
//! than silently skipped. Exact match, linear scan, first hit.

use crate::error::SinkError;
use crate::types::{CreateMeta, CustomField, IssueTypeMeta, ProjectMeta};

pub fn custom_field_id<'a>(
  fields: &'a [CustomField],
  name: &str,
) -> Result<&'a str, SinkError> {
  fields
    .iter()
    .find(|f| f.name == name)
    .map(|f| f.id.as_str())
    .ok_or_else(|| SinkError::not_found("custom field", name))
}

/// The first project listed in the createmeta response. Jira scopes the
/// response to the requested project key, so first is the configured one.
pub fn project<'a>(meta: &'a CreateMeta, project_key: &str) -> Result<&'a ProjectMeta, SinkError> {
  meta
    .projects
    .first()
    .ok_or_else(|| SinkError::not_found("project", project_key))
}

pub fn issue_type<'a>(
  project: &'a ProjectMeta,
  name: &str,
) -> Result<&'a IssueTypeMeta, SinkError> {
  project
    .issuetypes
    .iter()
    .find(|t| t.name == name)
    .ok_or_else(|| SinkError::not_found("issue type", name))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields() -> Vec<CustomField> {
    vec![
      CustomField {
        id: "customfield_10100".into(),
        name: "Hash".into(),
      },
      CustomField {
        id: "customfield_10101".into(),
        name: "Occurrences".into(),
      },
    ]
  }

  fn meta() -> CreateMeta {
    CreateMeta {
      projects: vec![ProjectMeta {
        id: "10000".into(),
        key: "OPS".into(),
        issuetypes: vec![
          IssueTypeMeta {
            id: "1".into(),
            name: "Bug".into(),
          },
          IssueTypeMeta {
            id: "3".into(),
            name: "Task".into(),
          },
        ],
      }],
    }
  }

  #[test]
  fn custom_field_hit() {
    assert_eq!(
      custom_field_id(&fields(), "Occurrences").unwrap(),
      "customfield_10101"
    );
  }

  #[test]
  fn custom_field_miss_is_not_found() {
    let err = custom_field_id(&fields(), "Counter").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Counter"));
  }

  #[test]
  fn custom_field_match_is_exact() {
    assert!(custom_field_id(&fields(), "hash").is_err());
  }

  #[test]
  fn project_and_issue_type_hit() {
    let meta = meta();
    let proj = project(&meta, "OPS").unwrap();
    assert_eq!(proj.id, "10000");
    assert_eq!(issue_type(proj, "Task").unwrap().id, "3");
  }

  #[test]
  fn issue_type_miss_is_not_found() {
    let meta = meta();
    let proj = project(&meta, "OPS").unwrap();
    assert!(issue_type(proj, "Incident").unwrap_err().is_not_found());
  }

  #[test]
  fn empty_createmeta_is_not_found() {
    let meta = CreateMeta { projects: vec![] };
    assert!(project(&meta, "OPS").unwrap_err().is_not_found());
  }
}
