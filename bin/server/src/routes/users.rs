//! Admin user-directory endpoints.

use crate::auth::{AppState, RequireAdmin};
use crate::error::ApiError;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use opsdeck_directory::{DirectoryQuery, UserFilter, UserStatus};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 50;

/// Query parameters for the listing endpoint.
///
/// Values are parsed leniently: anything unparseable falls back to its
/// default rather than failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    page: Option<String>,
    #[serde(default, rename = "perPage")]
    per_page: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl ListUsersParams {
    fn page(&self) -> u32 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE).max(1)
    }

    fn per_page(&self) -> u32 {
        parse_or(self.per_page.as_deref(), DEFAULT_PER_PAGE).clamp(1, 200)
    }

    fn filter(&self) -> UserFilter {
        UserFilter {
            query: self.q.clone(),
            status: self
                .status
                .as_deref()
                .and_then(|value| UserStatus::from_str(value).ok()),
        }
    }
}

fn parse_or(value: Option<&str>, fallback: u32) -> u32 {
    value
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}

fn directory_of(state: &AppState) -> Result<&DirectoryQuery, ApiError> {
    state.directory.as_ref().ok_or_else(|| {
        tracing::error!("admin directory requested but no service key is configured");
        ApiError::ServerConfiguration
    })
}

/// `GET /api/admin/users?page&perPage&q&status`
///
/// Platform admins only. Lists one page of the user directory.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
    admin: RequireAdmin,
) -> Response {
    let RequireAdmin { jar, .. } = admin;

    let directory = match directory_of(&state) {
        Ok(directory) => directory,
        Err(error) => return (jar, error).into_response(),
    };

    match directory
        .list(params.page(), params.per_page(), &params.filter())
        .await
    {
        Ok(page) => (jar, Json(page)).into_response(),
        Err(report) => (
            jar,
            ApiError::Upstream {
                details: report.to_string(),
            },
        )
            .into_response(),
    }
}

/// `GET /api/admin/users/count?q&status`
///
/// Platform admins only. Counts directory users; unfiltered counts are
/// capped upstream and may report a floor.
pub async fn count_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
    admin: RequireAdmin,
) -> Response {
    let RequireAdmin { jar, .. } = admin;

    let directory = match directory_of(&state) {
        Ok(directory) => directory,
        Err(error) => return (jar, error).into_response(),
    };

    match directory.count(&params.filter()).await {
        Ok(total) => (jar, Json(json!({ "total": total }))).into_response(),
        Err(report) => (
            jar,
            ApiError::Upstream {
                details: report.to_string(),
            },
        )
            .into_response(),
    }
}
