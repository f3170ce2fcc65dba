use opsdeck_access::{AdminClassifier, AdminPolicy};
use opsdeck_directory::{AdminApiClient, DirectoryQuery};
use opsdeck_server::auth::db::PgMembershipStore;
use opsdeck_server::auth::{AppState, SessionResolver};
use opsdeck_server::config::ServerConfig;
use opsdeck_server::routes;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let allow_list = config.access.allow_list();
    if allow_list.is_empty() && config.database_url.is_none() {
        tracing::warn!(
            "no admin allow-list and no membership database configured; every caller will be denied"
        );
    }

    // Resolve the admin policy once; every endpoint consumes the same one.
    let policy = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .expect("failed to connect to database");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("failed to run migrations");

            AdminPolicy::AllowListWithMembership {
                allow_list,
                store: Arc::new(PgMembershipStore::new(pool)),
            }
        }
        None => AdminPolicy::AllowListOnly { allow_list },
    };
    tracing::info!(policy = policy.describe(), "Resolved admin policy");

    let resolver = SessionResolver::new(&config.backend, &config.session)
        .expect("failed to build session resolver");

    let directory = match config.backend.service_key.as_deref() {
        Some(service_key) => Some(DirectoryQuery::new(
            AdminApiClient::new(&config.backend.url, service_key)
                .expect("failed to build admin API client"),
        )),
        None => {
            tracing::warn!("no service key configured; admin directory endpoints are disabled");
            None
        }
    };

    let classifier = AdminClassifier::new(policy);
    let state = Arc::new(AppState::new(resolver, classifier, directory, config.clone()));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install shutdown signal handler");
}
