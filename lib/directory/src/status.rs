//! Pure lifecycle-status derivation over raw provider records.

use crate::record::{DirectoryRecord, UserStatus};
use chrono::{DateTime, Utc};

/// Marker the provider uses for an indefinite ban.
const BAN_FOREVER: &str = "forever";

/// Returns true if the record's ban is still in effect at `now`.
///
/// An unparseable ban value counts as no ban; the provider only writes
/// the literal marker or an RFC 3339 timestamp.
fn ban_active(banned_until: Option<&str>, now: DateTime<Utc>) -> bool {
    match banned_until {
        None => false,
        Some(value) if value == BAN_FOREVER => true,
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|until| until.with_timezone(&Utc) > now)
            .unwrap_or(false),
    }
}

/// Derives the lifecycle status of a raw user record at `now`.
///
/// `disabled` wins when a ban is indefinite or still in the future.
/// Otherwise any confirmation or sign-in signal means `active`, and a
/// record with no signals at all is an outstanding invitation.
#[must_use]
pub fn derive_status(record: &DirectoryRecord, now: DateTime<Utc>) -> UserStatus {
    if ban_active(record.banned_until.as_deref(), now) {
        return UserStatus::Disabled;
    }

    if record.email_confirmed_at.is_some()
        || record.confirmed_at.is_some()
        || record.last_sign_in_at.is_some()
    {
        return UserStatus::Active;
    }

    UserStatus::Invited
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use opsdeck_core::UserId;

    fn record() -> DirectoryRecord {
        DirectoryRecord::new(UserId::from("user-1"))
    }

    #[test]
    fn forever_ban_is_disabled() {
        let mut r = record();
        r.banned_until = Some("forever".to_string());
        r.email_confirmed_at = Some(Utc::now());
        assert_eq!(derive_status(&r, Utc::now()), UserStatus::Disabled);
    }

    #[test]
    fn future_ban_is_disabled() {
        let now = Utc::now();
        let mut r = record();
        r.banned_until = Some((now + Duration::hours(1)).to_rfc3339());
        r.last_sign_in_at = Some(now);
        assert_eq!(derive_status(&r, now), UserStatus::Disabled);
    }

    #[test]
    fn expired_ban_with_confirmation_is_active() {
        let now = Utc::now();
        let mut r = record();
        r.banned_until = Some((now - Duration::hours(1)).to_rfc3339());
        r.email_confirmed_at = Some(now - Duration::days(30));
        assert_eq!(derive_status(&r, now), UserStatus::Active);
    }

    #[test]
    fn any_confirmation_signal_is_active() {
        let now = Utc::now();

        let mut r = record();
        r.confirmed_at = Some(now);
        assert_eq!(derive_status(&r, now), UserStatus::Active);

        let mut r = record();
        r.last_sign_in_at = Some(now);
        assert_eq!(derive_status(&r, now), UserStatus::Active);
    }

    #[test]
    fn no_signals_is_invited() {
        assert_eq!(derive_status(&record(), Utc::now()), UserStatus::Invited);
    }

    #[test]
    fn unparseable_ban_is_ignored() {
        let now = Utc::now();
        let mut r = record();
        r.banned_until = Some("not-a-timestamp".to_string());
        assert_eq!(derive_status(&r, now), UserStatus::Invited);
    }
}
