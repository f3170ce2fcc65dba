//! Database repository for admin membership.

use async_trait::async_trait;
use opsdeck_access::{MembershipError, MembershipStore};
use opsdeck_core::UserId;
use sqlx::PgPool;

/// Repository over the `platform_admins` marker table.
///
/// Read-only: rows are granted and revoked out of band, never through
/// the console.
#[derive(Debug, Clone)]
pub struct PgMembershipStore {
    pool: PgPool,
}

impl PgMembershipStore {
    /// Creates a new membership repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for PgMembershipStore {
    async fn is_member(&self, user_id: &UserId) -> Result<bool, MembershipError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM platform_admins
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MembershipError {
            details: e.to_string(),
        })?;

        Ok(row.is_some())
    }
}
