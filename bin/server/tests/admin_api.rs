//! API contract tests for the status, permissions, and directory routes.

mod common;

use async_trait::async_trait;
use common::{TestApp, TestAppBuilder};
use opsdeck_access::{MembershipError, MembershipStore};
use opsdeck_core::UserId;
use opsdeck_gate::{GateClient, GateOutcome};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

struct StaticStore {
    members: Vec<&'static str>,
}

#[async_trait]
impl MembershipStore for StaticStore {
    async fn is_member(&self, user_id: &UserId) -> Result<bool, MembershipError> {
        Ok(self.members.contains(&user_id.as_str()))
    }
}

struct BrokenStore;

#[async_trait]
impl MembershipStore for BrokenStore {
    async fn is_member(&self, _user_id: &UserId) -> Result<bool, MembershipError> {
        Err(MembershipError {
            details: "connection refused".to_string(),
        })
    }
}

async fn get_json(app: &TestApp, route: &str, cookie: Option<&str>) -> (u16, Value) {
    let mut request = app.http.get(app.url(route));
    if let Some(cookie) = cookie {
        request = request.header("cookie", cookie.to_string());
    }
    let response = request.send().await.expect("request");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn admin_check_anonymous_is_401() {
    let app = TestApp::spawn().await;

    let (status, body) = get_json(&app, "/api/qa/admin-check", None).await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn admin_check_reports_allow_list_admin() {
    let app = TestApp::spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"isPlatformAdmin": true, "email": "root@example.com"})
    );

    // Idempotent for an unchanged session.
    let (_, second) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(body, second);
}

#[tokio::test]
async fn admin_check_reports_non_admin() {
    let app = TestApp::spawn().await;
    app.mock_user("member-token", "user-2", "member@example.com")
        .await;

    let cookie = TestApp::session_cookie("member-token");
    let (status, body) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"isPlatformAdmin": false, "email": "member@example.com"})
    );
}

#[tokio::test]
async fn admin_check_upstream_failure_is_500() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.provider)
        .await;

    let cookie = TestApp::session_cookie("any-token");
    let (status, body) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Server error"}));
}

#[tokio::test]
async fn membership_row_grants_admin_through_the_api() {
    let app = TestAppBuilder::new()
        .platform_admins("")
        .membership_store(Arc::new(StaticStore {
            members: vec!["user-7"],
        }))
        .spawn()
        .await;
    app.mock_user("member-token", "user-7", "dba@example.com")
        .await;

    let cookie = TestApp::session_cookie("member-token");
    let (status, body) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(body["isPlatformAdmin"], json!(true));
}

#[tokio::test]
async fn membership_store_failure_is_500_not_forbidden() {
    let app = TestAppBuilder::new()
        .platform_admins("")
        .membership_store(Arc::new(BrokenStore))
        .spawn()
        .await;
    app.mock_user("member-token", "user-2", "member@example.com")
        .await;

    let cookie = TestApp::session_cookie("member-token");
    let (status, body) = get_json(&app, "/api/qa/admin-check", Some(&cookie)).await;
    assert_eq!(status, 500, "a store failure is a server error, not a denial");
    assert_eq!(body, json!({"error": "Server error"}));
}

#[tokio::test]
async fn permissions_reflect_the_admin_decision() {
    let app = TestApp::spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;
    app.mock_user("member-token", "user-2", "member@example.com")
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/v1/me/permissions", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "email": "root@example.com",
            "permissions": ["platform:admin"],
            "role": "platform_admin"
        })
    );

    let cookie = TestApp::session_cookie("member-token");
    let (_, body) = get_json(&app, "/api/v1/me/permissions", Some(&cookie)).await;
    assert_eq!(
        body,
        json!({
            "email": "member@example.com",
            "permissions": [],
            "role": "user"
        })
    );
}

#[tokio::test]
async fn users_listing_requires_authentication_and_admin() {
    let app = TestApp::spawn().await;
    app.mock_user("member-token", "user-2", "member@example.com")
        .await;
    app.mock_user_fallback_unauthorized().await;

    let (status, body) = get_json(&app, "/api/admin/users", None).await;
    assert_eq!(status, 401);
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let cookie = TestApp::session_cookie("member-token");
    let (status, body) = get_json(&app, "/api/admin/users", Some(&cookie)).await;
    assert_eq!(status, 403);
    assert_eq!(body, json!({"error": "Forbidden"}));
}

#[tokio::test]
async fn users_listing_passes_pagination_through() {
    let app = TestApp::spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"id": "u1", "email": "a@example.com", "last_sign_in_at": "2025-02-01T12:00:00Z"},
                {"id": "u2", "email": "b@example.com"}
            ]
        })))
        .expect(1)
        .mount(&app.provider)
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/admin/users", Some(&cookie)).await;

    assert_eq!(status, 200);
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["perPage"], json!(50));
    assert_eq!(body["nextPage"], json!(null));
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["status"], json!("active"));
    assert_eq!(users[1]["status"], json!("invited"));
}

#[tokio::test]
async fn users_listing_filters_with_diacritic_insensitive_query() {
    let app = TestApp::spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {
                    "id": "u1",
                    "email": "jose@example.com",
                    "user_metadata": {"full_name": "José Silva"}
                },
                {"id": "u2", "email": "ana@example.com"}
            ]
        })))
        .mount(&app.provider)
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/admin/users?q=jose", Some(&cookie)).await;

    assert_eq!(status, 200);
    assert_eq!(body["total"], json!(1));
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["display_name"], json!("José Silva"));
}

#[tokio::test]
async fn users_count_sums_pages() {
    let app = TestApp::spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u1"}, {"id": "u2"}, {"id": "u3"}]
        })))
        .mount(&app.provider)
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/admin/users/count", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"total": 3}));
}

#[tokio::test]
async fn missing_service_key_is_a_configuration_error() {
    let app = TestAppBuilder::new().without_service_key().spawn().await;
    app.mock_user("admin-token", "user-1", "root@example.com")
        .await;

    let cookie = TestApp::session_cookie("admin-token");
    let (status, body) = get_json(&app, "/api/admin/users", Some(&cookie)).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Server configuration error"}));
}

#[tokio::test]
async fn public_env_exposes_only_public_coordinates() {
    let app = TestApp::spawn().await;

    let (status, body) = get_json(&app, "/api/public-env", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["url"], json!(app.provider.uri()));
    assert_eq!(body["anonKey"], json!("anon-key"));
    assert!(body.get("serviceKey").is_none());
}

#[tokio::test]
async fn gate_client_denies_anonymous_sessions() {
    let app = TestApp::spawn().await;

    let gate = GateClient::new(&app.base_url).expect("gate client");
    assert_eq!(gate.resolve().await, GateOutcome::Denied);
    assert!(gate.state().is_ready());
}
