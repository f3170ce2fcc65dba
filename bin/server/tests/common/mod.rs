#![allow(dead_code)]

//! Shared harness for server integration tests.
//!
//! Spawns the real router on an ephemeral port with a wiremock server
//! standing in for the hosted identity provider.

use opsdeck_access::{AdminClassifier, AdminPolicy, MembershipStore};
use opsdeck_directory::{AdminApiClient, DirectoryQuery};
use opsdeck_server::auth::{AppState, SessionResolver};
use opsdeck_server::config::{AccessConfig, BackendConfig, ServerConfig, SessionConfig};
use opsdeck_server::routes;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running server plus its fake identity provider.
pub struct TestApp {
    pub base_url: String,
    pub provider: MockServer,
    pub http: reqwest::Client,
}

pub struct TestAppBuilder {
    platform_admins: String,
    service_key: Option<String>,
    membership_store: Option<Arc<dyn MembershipStore>>,
    public_base_url: Option<String>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            platform_admins: "root@example.com".to_string(),
            service_key: Some("service-key".to_string()),
            membership_store: None,
            public_base_url: None,
        }
    }

    pub fn platform_admins(mut self, admins: &str) -> Self {
        self.platform_admins = admins.to_string();
        self
    }

    pub fn without_service_key(mut self) -> Self {
        self.service_key = None;
        self
    }

    pub fn membership_store(mut self, store: Arc<dyn MembershipStore>) -> Self {
        self.membership_store = Some(store);
        self
    }

    /// Points the gate's same-origin admin-check call somewhere else,
    /// for exercising the fail-closed path.
    pub fn public_base_url(mut self, url: &str) -> Self {
        self.public_base_url = Some(url.to_string());
        self
    }

    pub async fn spawn(self) -> TestApp {
        let provider = MockServer::start().await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{addr}");

        let config = ServerConfig {
            listen_addr: addr.to_string(),
            public_base_url: self
                .public_base_url
                .clone()
                .unwrap_or_else(|| base_url.clone()),
            database_url: None,
            backend: BackendConfig {
                url: provider.uri(),
                anon_key: "anon-key".to_string(),
                service_key: self.service_key.clone(),
            },
            access: AccessConfig {
                platform_admins: self.platform_admins.clone(),
                ..AccessConfig::default()
            },
            session: SessionConfig {
                secure_cookies: false,
            },
        };

        let allow_list = config.access.allow_list();
        let policy = match self.membership_store {
            Some(store) => AdminPolicy::AllowListWithMembership { allow_list, store },
            None => AdminPolicy::AllowListOnly { allow_list },
        };

        let resolver = SessionResolver::new(&config.backend, &config.session).expect("resolver");
        let directory = config.backend.service_key.as_deref().map(|service_key| {
            DirectoryQuery::new(
                AdminApiClient::new(&config.backend.url, service_key).expect("admin client"),
            )
        });

        let state = Arc::new(AppState::new(
            resolver,
            AdminClassifier::new(policy),
            directory,
            config,
        ));
        let app = routes::router(state);

        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service())
                .await
                .expect("serve test app");
        });

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client");

        TestApp {
            base_url,
            provider,
            http,
        }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        TestAppBuilder::new().spawn().await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cookie header value for an access token.
    pub fn session_cookie(token: &str) -> String {
        format!("od_access_token={token}")
    }

    /// Maps an access token to a provider user.
    pub async fn mock_user(&self, token: &str, id: &str, email: &str) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": id,
                "email": email,
            })))
            .mount(&self.provider)
            .await;
    }

    /// Rejects any access token not matched by a more specific mock.
    pub async fn mock_user_fallback_unauthorized(&self) {
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(100)
            .mount(&self.provider)
            .await;
    }
}
