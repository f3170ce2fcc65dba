//! HTTP client for the provider's privileged admin listing API.

use crate::error::DirectoryError;
use crate::record::DirectoryRecord;
use rootcause::prelude::Report;
use serde::Deserialize;
use tracing::instrument;

/// Response header carrying the provider's total record count.
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Client for the hosted provider's admin user-listing API.
///
/// Requires the privileged service key. Constructed once by the
/// composition root and cloned where needed; never created lazily
/// behind a global.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// One page of raw users from the bulk listing.
#[derive(Debug, Clone)]
pub struct UserPage {
    /// The records on this page.
    pub users: Vec<DirectoryRecord>,
    /// Upstream-reported total, when the provider exposes one.
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListUsersBody {
    #[serde(default)]
    users: Vec<DirectoryRecord>,
}

impl AdminApiClient {
    /// Creates a new admin API client.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, service_key: &str) -> Result<Self, Report<DirectoryError>> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| DirectoryError::Transport {
                details: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    /// Fetches one page of the bulk user listing.
    ///
    /// # Errors
    ///
    /// Returns `Transport` when the provider is unreachable, `Listing`
    /// on a non-success status, and `Decode` when the payload does not
    /// match the listing contract.
    #[instrument(skip(self))]
    pub async fn list_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<UserPage, Report<DirectoryError>> {
        let response = self
            .http
            .get(format!("{}/auth/v1/admin/users", self.base_url))
            .query(&[("page", page), ("per_page", per_page)])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Listing {
                status: status.as_u16(),
            }
            .into());
        }

        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let body: ListUsersBody =
            response
                .json()
                .await
                .map_err(|e| DirectoryError::Decode {
                    details: e.to_string(),
                })?;

        Ok(UserPage {
            users: body.users,
            total,
        })
    }
}
