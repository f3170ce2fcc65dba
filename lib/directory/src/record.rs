//! Raw user records as returned by the provider's admin listing.

use chrono::{DateTime, Utc};
use opsdeck_core::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A raw user record from the identity provider's bulk admin listing.
///
/// Only the fields the directory consumes are modeled; the provider
/// sends more and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Provider-issued user id.
    pub id: UserId,
    /// Primary e-mail address, when set.
    #[serde(default)]
    pub email: Option<String>,
    /// When the record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Generic confirmation timestamp.
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    /// E-mail confirmation timestamp.
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Last successful sign-in.
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    /// Either an RFC 3339 timestamp or the provider's literal
    /// `"forever"` marker. Kept as a string for that reason.
    #[serde(default)]
    pub banned_until: Option<String>,
    /// Free-form profile metadata (names, organizations).
    #[serde(default)]
    pub user_metadata: Option<Value>,
}

impl DirectoryRecord {
    /// Creates a record with every optional field unset.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            created_at: None,
            confirmed_at: None,
            email_confirmed_at: None,
            last_sign_in_at: None,
            banned_until: None,
            user_metadata: None,
        }
    }
}

/// Lifecycle status derived from a record's signals; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Confirmed or has signed in at least once.
    Active,
    /// No confirmation or sign-in signal yet.
    Invited,
    /// Banned indefinitely or until a future instant.
    Disabled,
}

impl UserStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Invited => "invited",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a status from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    /// The value that failed to parse.
    pub value: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown user status '{}'", self.value)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for UserStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "invited" => Ok(Self::Invited),
            "disabled" => Ok(Self::Disabled),
            other => Err(ParseStatusError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_provider_payload() {
        let record: DirectoryRecord = serde_json::from_str(
            r#"{
                "id": "user-1",
                "email": "jose@example.com",
                "created_at": "2025-01-10T09:30:00Z",
                "last_sign_in_at": "2025-02-01T12:00:00Z",
                "banned_until": "forever",
                "user_metadata": {"full_name": "José Silva"},
                "aud": "authenticated"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(record.id.as_str(), "user-1");
        assert_eq!(record.email.as_deref(), Some("jose@example.com"));
        assert_eq!(record.banned_until.as_deref(), Some("forever"));
        assert!(record.created_at.is_some());
        assert!(record.confirmed_at.is_none());
    }

    #[test]
    fn record_deserializes_minimal_payload() {
        let record: DirectoryRecord =
            serde_json::from_str(r#"{"id": "user-2"}"#).expect("deserialize");
        assert!(record.email.is_none());
        assert!(record.user_metadata.is_none());
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [UserStatus::Active, UserStatus::Invited, UserStatus::Disabled] {
            let parsed: UserStatus = status.as_str().parse().expect("parse");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let err = "banned".parse::<UserStatus>().expect_err("must fail");
        assert!(err.to_string().contains("banned"));
    }

    #[test]
    fn status_serialization_format() {
        let json = serde_json::to_string(&UserStatus::Disabled).expect("serialize");
        assert_eq!(json, "\"disabled\"");
    }
}
