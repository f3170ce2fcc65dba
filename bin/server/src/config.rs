//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables
//! (`BACKEND__URL`, `ACCESS__PLATFORM_ADMINS`, `DATABASE_URL`, ...).

use opsdeck_access::AdminAllowList;
use serde::Deserialize;

/// Server configuration composed from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Externally reachable origin of this server, used for the access
    /// gate's same-origin admin-check call.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// PostgreSQL URL for the admin-membership table. When unset, the
    /// e-mail allow-list is the only active admin check.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Hosted identity provider coordinates.
    pub backend: BackendConfig,

    /// Access-gate configuration.
    #[serde(default)]
    pub access: AccessConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Hosted identity provider coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the provider.
    pub url: String,

    /// Publishable anonymous key, sent with user-scoped requests. Safe
    /// to expose to browsers via `/api/public-env`.
    pub anon_key: String,

    /// Privileged service key for the bulk admin listing API. Admin
    /// directory endpoints answer with a configuration error when this
    /// is unset.
    #[serde(default)]
    pub service_key: Option<String>,
}

/// Access-gate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated e-mail allow-list of platform admins.
    #[serde(default)]
    pub platform_admins: String,

    /// Comma-separated path prefixes served without the gate.
    #[serde(default = "default_public_paths")]
    pub public_paths: String,
}

impl AccessConfig {
    /// Parses the configured allow-list.
    #[must_use]
    pub fn allow_list(&self) -> AdminAllowList {
        AdminAllowList::parse(&self.platform_admins)
    }

    /// Returns the public path prefixes, trimmed.
    #[must_use]
    pub fn public_prefixes(&self) -> Vec<String> {
        self.public_paths
            .split(',')
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            platform_admins: String::new(),
            public_paths: default_public_paths(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local
    /// HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_public_paths() -> String {
    "/login,/healthz,/api,/assets,/favicon.ico".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
