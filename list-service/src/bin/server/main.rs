use std::sync::Arc;

use anyhow::Context;
use anyhow::Error;
use auth::Authenticator;
use axum::http::HeaderValue;
use chrono::Duration;
use list_service::config::Config;
use list_service::config::StorageBackend;
use list_service::inbound::http::router::create_router;
use list_service::inbound::http::router::AppState;
use list_service::outbound::repositories::InMemoryRepository;
use list_service::outbound::repositories::PostgresItemRepository;
use list_service::outbound::repositories::PostgresListRepository;
use list_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "list_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "list-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        client_url = %config.server.client_url,
        secure_cookies = config.jwt.secure_cookies,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            config.jwt.refresh_secret.as_bytes(),
        )
        .with_lifetimes(
            Duration::minutes(config.jwt.access_expiration_minutes),
            Duration::days(config.jwt.refresh_expiration_days),
        ),
    );

    let refresh_cookie_max_age = time::Duration::days(config.jwt.refresh_expiration_days);

    let state = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            AppState::new(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresListRepository::new(pg_pool.clone())),
                Arc::new(PostgresItemRepository::new(pg_pool)),
                authenticator,
                config.jwt.secure_cookies,
                refresh_cookie_max_age,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let repository = Arc::new(InMemoryRepository::new());

            AppState::new(
                Arc::clone(&repository),
                Arc::clone(&repository),
                repository,
                authenticator,
                config.jwt.secure_cookies,
                refresh_cookie_max_age,
            )
        }
    };

    let allowed_origin = HeaderValue::from_str(&config.server.client_url)
        .context("server.client_url is not a valid origin")?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        "Server Listening"
    );

    axum::serve(listener, create_router(state, allowed_origin)).await?;

    Ok(())
}
