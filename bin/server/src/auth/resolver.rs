//! Session resolution against the hosted identity provider.

use crate::auth::cookies::{
    ACCESS_COOKIE, REFRESH_COOKIE, REFRESH_MAX_AGE, removal_cookie, session_cookie,
};
use crate::config::{BackendConfig, SessionConfig};
use axum_extra::extract::CookieJar;
use opsdeck_access::Identity;
use opsdeck_core::UserId;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use time::Duration;
use tracing::{debug, instrument};

/// Outcome of resolving request credentials.
#[derive(Debug)]
pub enum SessionOutcome {
    /// A valid session mapped to this identity.
    Authenticated(Identity),
    /// No usable credentials; a normal negative, not an error.
    Anonymous,
    /// The provider could not be consulted.
    Failed(ResolverError),
}

/// A resolved session plus the credential-refresh buffer.
///
/// The jar carries any cookie writes performed during resolution
/// (token rotation, invalid-credential clearing) and must be flushed
/// onto the response whatever the outcome.
#[derive(Debug)]
pub struct ResolvedSession {
    /// What the credentials resolved to.
    pub outcome: SessionOutcome,
    /// The request jar, including pending writes.
    pub jar: CookieJar,
}

/// Errors while consulting the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The provider was unreachable or sent an undecodable payload.
    Transport {
        /// Error details.
        details: String,
    },
    /// The provider answered outside its contract.
    Unexpected {
        /// HTTP status returned by the provider.
        status: u16,
    },
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { details } => {
                write!(f, "identity provider unreachable: {}", details)
            }
            Self::Unexpected { status } => {
                write!(f, "identity provider returned status {}", status)
            }
        }
    }
}

impl std::error::Error for ResolverError {}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Deserialize)]
struct RefreshedTokens {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

/// Resolves request cookies to an identity via the hosted provider.
///
/// Owns the user-scoped HTTP client; constructed once by the
/// composition root.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    secure_cookies: bool,
}

impl SessionResolver {
    /// Creates a resolver against the configured provider.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(backend: &BackendConfig, session: &SessionConfig) -> Result<Self, ResolverError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ResolverError::Transport {
                details: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: backend.url.trim_end_matches('/').to_string(),
            anon_key: backend.anon_key.clone(),
            secure_cookies: session.secure_cookies,
        })
    }

    /// Resolves the request's cookies to an identity.
    ///
    /// An expired access token falls through to the refresh grant; a
    /// rejected refresh token clears both cookies. "No session" is
    /// `Anonymous`, never an error.
    #[instrument(skip_all)]
    pub async fn resolve(&self, jar: CookieJar) -> ResolvedSession {
        let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
        let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

        if let Some(token) = access {
            match self.fetch_user(&token).await {
                Ok(Some(identity)) => {
                    return ResolvedSession {
                        outcome: SessionOutcome::Authenticated(identity),
                        jar,
                    };
                }
                // Invalid or expired access token: fall through to refresh.
                Ok(None) => {}
                Err(error) => {
                    return ResolvedSession {
                        outcome: SessionOutcome::Failed(error),
                        jar,
                    };
                }
            }
        }

        if let Some(token) = refresh {
            return self.resolve_via_refresh(jar, &token).await;
        }

        ResolvedSession {
            outcome: SessionOutcome::Anonymous,
            jar,
        }
    }

    async fn resolve_via_refresh(&self, jar: CookieJar, refresh_token: &str) -> ResolvedSession {
        match self.exchange_refresh_token(refresh_token).await {
            Ok(Some(tokens)) => {
                let jar = self.write_session_cookies(jar, &tokens);
                match self.fetch_user(&tokens.access_token).await {
                    Ok(Some(identity)) => {
                        debug!(user_id = %identity.id(), "session refreshed");
                        ResolvedSession {
                            outcome: SessionOutcome::Authenticated(identity),
                            jar,
                        }
                    }
                    Ok(None) => ResolvedSession {
                        outcome: SessionOutcome::Anonymous,
                        jar: Self::clear_session_cookies(jar),
                    },
                    Err(error) => ResolvedSession {
                        outcome: SessionOutcome::Failed(error),
                        jar,
                    },
                }
            }
            Ok(None) => {
                debug!("refresh token rejected; clearing session cookies");
                ResolvedSession {
                    outcome: SessionOutcome::Anonymous,
                    jar: Self::clear_session_cookies(jar),
                }
            }
            Err(error) => ResolvedSession {
                outcome: SessionOutcome::Failed(error),
                jar,
            },
        }
    }

    /// Fetches the user behind an access token.
    ///
    /// `Ok(None)` means the token was rejected, a normal negative.
    async fn fetch_user(&self, access_token: &str) -> Result<Option<Identity>, ResolverError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ResolverError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolverError::Unexpected {
                status: status.as_u16(),
            });
        }

        let user: ProviderUser = response.json().await.map_err(|e| ResolverError::Transport {
            details: format!("failed to decode user payload: {}", e),
        })?;

        Ok(Some(Identity::new(UserId::new(user.id), user.email)))
    }

    /// Exchanges a refresh token for a rotated token pair.
    ///
    /// `Ok(None)` means the provider rejected the token: revoked or
    /// already rotated.
    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<RefreshedTokens>, ResolverError> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=refresh_token",
                self.base_url
            ))
            .header("apikey", &self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ResolverError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status.is_client_error() {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolverError::Unexpected {
                status: status.as_u16(),
            });
        }

        let tokens: RefreshedTokens =
            response.json().await.map_err(|e| ResolverError::Transport {
                details: format!("failed to decode token payload: {}", e),
            })?;

        Ok(Some(tokens))
    }

    fn write_session_cookies(&self, jar: CookieJar, tokens: &RefreshedTokens) -> CookieJar {
        jar.add(session_cookie(
            ACCESS_COOKIE,
            tokens.access_token.clone(),
            self.secure_cookies,
            Duration::seconds(tokens.expires_in),
        ))
        .add(session_cookie(
            REFRESH_COOKIE,
            tokens.refresh_token.clone(),
            self.secure_cookies,
            REFRESH_MAX_AGE,
        ))
    }

    fn clear_session_cookies(jar: CookieJar) -> CookieJar {
        jar.add(removal_cookie(ACCESS_COOKIE))
            .add(removal_cookie(REFRESH_COOKIE))
    }
}
