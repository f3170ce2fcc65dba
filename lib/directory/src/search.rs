//! Case- and diacritic-insensitive search over user records.

use crate::record::{DirectoryRecord, UserStatus};
use crate::status::derive_status;
use chrono::{DateTime, Utc};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Folds a string for matching: Unicode compatibility decomposition
/// followed by lowercasing, so `"José"` and `"jose"` compare equal on
/// their shared prefix.
#[must_use]
pub fn fold(value: &str) -> String {
    value.nfkd().collect::<String>().to_lowercase()
}

/// Metadata fields searched, in priority order.
const SEARCH_KEYS: [&str; 5] = ["full_name", "name", "display_name", "username", "org_name"];

fn metadata_fields(metadata: &Value) -> Vec<&str> {
    let mut fields = Vec::new();

    for key in SEARCH_KEYS {
        if let Some(value) = metadata.get(key).and_then(Value::as_str) {
            fields.push(value);
        }
    }

    if let Some(name) = metadata
        .get("organization")
        .and_then(|org| org.get("name"))
        .and_then(Value::as_str)
    {
        fields.push(name);
    }

    if let Some(entries) = metadata.get("organizations").and_then(Value::as_array) {
        for entry in entries {
            if let Some(name) = entry.get("name").and_then(Value::as_str) {
                fields.push(name);
            }
        }
    }

    fields
}

/// Returns true if the record matches the already-folded query.
fn matches_query(record: &DirectoryRecord, folded_query: &str) -> bool {
    if folded_query.is_empty() {
        return true;
    }

    if let Some(email) = record.email.as_deref() {
        if fold(email).contains(folded_query) {
            return true;
        }
    }

    record
        .user_metadata
        .as_ref()
        .map(|metadata| {
            metadata_fields(metadata)
                .iter()
                .any(|field| fold(field).contains(folded_query))
        })
        .unwrap_or(false)
}

/// Filter options for directory queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Free-text query over e-mail and profile names.
    pub query: Option<String>,
    /// Restrict to a derived lifecycle status.
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// Returns the query trimmed, or None when it is blank.
    #[must_use]
    pub fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Returns true when no filtering is requested, meaning pagination
    /// can pass straight through to the provider.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trimmed_query().is_none() && self.status.is_none()
    }
}

/// Applies status and query filters to raw records.
#[must_use]
pub fn filter_records(
    records: Vec<DirectoryRecord>,
    filter: &UserFilter,
    now: DateTime<Utc>,
) -> Vec<DirectoryRecord> {
    let folded_query = filter.trimmed_query().map(fold).unwrap_or_default();

    records
        .into_iter()
        .filter(|record| {
            if let Some(status) = filter.status {
                if derive_status(record, now) != status {
                    return false;
                }
            }
            matches_query(record, &folded_query)
        })
        .collect()
}
