//! Projection of raw records into the summaries served to clients.

use crate::record::{DirectoryRecord, UserStatus};
use crate::status::derive_status;
use chrono::{DateTime, Utc};
use opsdeck_core::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user row as served by the directory endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Provider-issued user id.
    pub id: UserId,
    /// Primary e-mail address; empty when the provider has none.
    pub email: String,
    /// Best available display name from profile metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Derived lifecycle status.
    pub status: UserStatus,
    /// Organization name from profile metadata, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
}

/// Metadata keys tried, in order, for the display name.
const DISPLAY_NAME_KEYS: [&str; 4] = ["full_name", "name", "display_name", "username"];

/// Returns the first non-blank string value among `keys` in `metadata`.
fn pick_string(metadata: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Resolves the organization name from profile metadata.
///
/// Tries the flat `org_name` field first, then a nested `organization`
/// object's name, then the first named entry of an `organizations`
/// list.
fn pick_org_name(metadata: &Value) -> Option<String> {
    if let Some(name) = pick_string(metadata, &["org_name"]) {
        return Some(name);
    }

    if let Some(name) = metadata
        .get("organization")
        .and_then(|org| pick_string(org, &["name"]))
    {
        return Some(name);
    }

    metadata
        .get("organizations")
        .and_then(Value::as_array)
        .and_then(|entries| {
            entries
                .iter()
                .find_map(|entry| pick_string(entry, &["name"]))
        })
}

/// Projects a raw record into the summary served to clients.
#[must_use]
pub fn to_summary(record: &DirectoryRecord, now: DateTime<Utc>) -> UserSummary {
    let metadata = record.user_metadata.as_ref();

    UserSummary {
        id: record.id.clone(),
        email: record.email.clone().unwrap_or_default(),
        display_name: metadata.and_then(|m| pick_string(m, &DISPLAY_NAME_KEYS)),
        created_at: record.created_at,
        status: derive_status(record, now),
        org_name: metadata.and_then(pick_org_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_metadata(metadata: Value) -> DirectoryRecord {
        let mut record = DirectoryRecord::new(UserId::from("user-1"));
        record.email = Some("jose@example.com".to_string());
        record.user_metadata = Some(metadata);
        record
    }

    #[test]
    fn display_name_prefers_full_name() {
        let record = record_with_metadata(json!({
            "full_name": "José Silva",
            "name": "José",
            "username": "jsilva"
        }));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.display_name.as_deref(), Some("José Silva"));
    }

    #[test]
    fn display_name_falls_back_in_priority_order() {
        let record = record_with_metadata(json!({"username": "jsilva", "display_name": "JS"}));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.display_name.as_deref(), Some("JS"));
    }

    #[test]
    fn blank_names_are_skipped() {
        let record = record_with_metadata(json!({"full_name": "   ", "name": "José"}));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.display_name.as_deref(), Some("José"));
    }

    #[test]
    fn org_name_from_flat_field() {
        let record = record_with_metadata(json!({"org_name": "Acme"}));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.org_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn org_name_from_nested_organization() {
        let record = record_with_metadata(json!({"organization": {"name": "Acme"}}));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.org_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn org_name_from_organizations_list() {
        let record = record_with_metadata(json!({"organizations": [{"id": 1}, {"name": "Acme"}]}));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.org_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn missing_email_becomes_empty_string() {
        let record = DirectoryRecord::new(UserId::from("user-2"));
        let summary = to_summary(&record, Utc::now());
        assert_eq!(summary.email, "");
        assert_eq!(summary.status, UserStatus::Invited);
    }

    #[test]
    fn summary_serializes_without_absent_fields() {
        let record = DirectoryRecord::new(UserId::from("user-2"));
        let json = serde_json::to_value(to_summary(&record, Utc::now())).expect("serialize");
        assert!(json.get("display_name").is_none());
        assert!(json.get("org_name").is_none());
        assert_eq!(json["status"], "invited");
    }
}
