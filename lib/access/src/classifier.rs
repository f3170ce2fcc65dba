//! Classification of identities as platform admins.

use crate::decision::AccessDecision;
use crate::error::AccessError;
use crate::identity::Identity;
use crate::policy::AdminPolicy;
use tracing::debug;

/// Decides platform-admin status for resolved identities.
///
/// The allow-list check runs first and short-circuits the membership
/// lookup: it needs no backend call, and it keeps admin access working
/// when the persisted store is unreachable. The two checks are never
/// raced in parallel; the ordering is part of the contract.
#[derive(Debug, Clone)]
pub struct AdminClassifier {
    policy: AdminPolicy,
}

impl AdminClassifier {
    /// Creates a classifier over the startup-resolved policy.
    #[must_use]
    pub fn new(policy: AdminPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &AdminPolicy {
        &self.policy
    }

    /// Returns whether the identity is a platform admin.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Upstream` when the membership lookup
    /// fails. A lookup failure is never reported as "not admin" or as
    /// "admin", so callers can fail closed while keeping the failure
    /// distinguishable from an ordinary denial.
    pub async fn is_admin(&self, identity: &Identity) -> Result<bool, AccessError> {
        if let Some(email) = identity.normalized_email() {
            if self.policy.allow_list().contains(&email) {
                debug!(user_id = %identity.id(), "admin via allow-list");
                return Ok(true);
            }
        }

        if let Some(store) = self.policy.membership_store() {
            let member = store
                .is_member(identity.id())
                .await
                .map_err(|e| AccessError::Upstream {
                    details: e.to_string(),
                })?;

            if member {
                debug!(user_id = %identity.id(), "admin via membership row");
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Classifies an identity into a full access decision.
    ///
    /// # Errors
    ///
    /// Propagates membership-lookup failures, as [`Self::is_admin`].
    pub async fn decide(&self, identity: &Identity) -> Result<AccessDecision, AccessError> {
        let email = identity.email().map(str::to_string);
        if self.is_admin(identity).await? {
            Ok(AccessDecision::admin(email))
        } else {
            Ok(AccessDecision::member(email))
        }
    }
}
