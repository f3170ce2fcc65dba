//! Client for the server's admin status endpoint.

use crate::error::GateError;
use crate::state::{GateOutcome, GateState};
use rootcause::prelude::Report;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::warn;

/// Client-side admin gate.
///
/// Calls `GET /api/qa/admin-check` at most once per instance and caches
/// the decision for the instance's lifetime. One instance per client
/// session, so the decision is never cached across sessions. Dropping
/// the future returned by [`Self::resolve`] cancels the in-flight
/// request, so a torn-down view cannot observe a late answer.
pub struct GateClient {
    http: reqwest::Client,
    base_url: String,
    redirect_on_deny: bool,
    decision: OnceCell<bool>,
}

#[derive(Debug, Deserialize)]
struct AdminCheckBody {
    #[serde(rename = "isPlatformAdmin", default)]
    is_platform_admin: bool,
}

impl GateClient {
    /// Creates a gate client against the console's origin.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, Report<GateError>> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GateError::Configuration {
                details: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            redirect_on_deny: false,
            decision: OnceCell::new(),
        })
    }

    /// Chooses a login redirect instead of a passive denial when the
    /// gate resolves to "not admin".
    #[must_use]
    pub fn redirect_on_deny(mut self, redirect: bool) -> Self {
        self.redirect_on_deny = redirect;
        self
    }

    /// Returns the current state without touching the network.
    #[must_use]
    pub fn state(&self) -> GateState {
        match self.decision.get() {
            None => GateState::Pending,
            Some(is_admin) => GateState::Ready {
                is_admin: *is_admin,
            },
        }
    }

    /// Resolves the gate, fetching the status endpoint on first call.
    ///
    /// Always reaches a `Ready` decision: any failure resolves to "not
    /// admin" rather than leaving the caller pending.
    pub async fn resolve(&self) -> GateOutcome {
        let is_admin = *self
            .decision
            .get_or_init(|| self.fetch_admin_flag())
            .await;

        if is_admin {
            GateOutcome::Allowed
        } else if self.redirect_on_deny {
            GateOutcome::RedirectToLogin {
                location: format!("{}/login?error=access_denied", self.base_url),
            }
        } else {
            GateOutcome::Denied
        }
    }

    async fn fetch_admin_flag(&self) -> bool {
        let url = format!("{}/api/qa/admin-check", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, "admin check unreachable; denying");
                return false;
            }
        };

        if !response.status().is_success() {
            return false;
        }

        match response.json::<AdminCheckBody>().await {
            Ok(body) => body.is_platform_admin,
            Err(error) => {
                warn!(error = %error, "admin check payload malformed; denying");
                false
            }
        }
    }
}
