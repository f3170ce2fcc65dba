//! Static allow-list of administrator e-mail addresses.

use std::collections::BTreeSet;

/// Immutable, process-wide set of admin e-mails sourced from
/// configuration at startup.
///
/// Entries are folded to lowercase once at parse time and membership
/// checks fold their input the same way, so comparison is always
/// case-insensitive. The allow-list exists to bootstrap admin access
/// before any membership row has been created, and keeps working when
/// the persisted store is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: BTreeSet<String>,
}

impl AdminAllowList {
    /// Parses a comma-separated list of e-mail addresses.
    ///
    /// Entries are trimmed and lowercased; empty entries are discarded,
    /// so trailing commas and doubled separators are harmless.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();

        Self { emails }
    }

    /// Creates an empty allow-list.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the given e-mail is on the list, ignoring case.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns true if no entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
