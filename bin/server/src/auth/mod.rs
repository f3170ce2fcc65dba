//! Authentication and authorization for the opsdeck server.
//!
//! This module provides:
//! - Session resolution against the hosted identity provider
//! - The Postgres-backed admin-membership repository
//! - The access gate run ahead of every non-public route
//! - Extractors guarding admin-only API routes
//!
//! # Authorization Model
//!
//! The only authorization question here is **platform access**: is the
//! caller a platform admin? The decision comes from one classifier
//! consulting the configured allow-list and, when a database is
//! configured, the `platform_admins` membership table, in that order,
//! on every request. Nothing is cached across requests; the session
//! cookies themselves carry no roles, so a revoked admin loses access
//! on their next request rather than at session expiry.
//!
//! Cookies rotated while resolving a session are accumulated on the
//! request's cookie jar, and every response path (allow, deny, error)
//! flushes that jar.

pub mod cookies;
pub mod db;
pub mod extract;
pub mod middleware;
pub mod resolver;

pub use extract::RequireAdmin;
pub use resolver::{ResolvedSession, SessionOutcome, SessionResolver};

use crate::config::ServerConfig;
use opsdeck_access::AdminClassifier;
use opsdeck_directory::DirectoryQuery;

/// Shared application state.
///
/// Every client handle in here is constructed by the composition root
/// and injected; nothing is created lazily behind a global.
pub struct AppState {
    /// Resolves request cookies to identities.
    pub resolver: SessionResolver,
    /// Decides platform-admin status.
    pub classifier: AdminClassifier,
    /// Directory queries; `None` when no service key is configured.
    pub directory: Option<DirectoryQuery>,
    /// HTTP client for the gate's same-origin admin-check call.
    pub gate_http: reqwest::Client,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        resolver: SessionResolver,
        classifier: AdminClassifier,
        directory: Option<DirectoryQuery>,
        config: ServerConfig,
    ) -> Self {
        Self {
            resolver,
            classifier,
            directory,
            gate_http: reqwest::Client::new(),
            config,
        }
    }
}
