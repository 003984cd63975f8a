//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth crate through `kernel::error::AppError`.

mod config;

use auth::domain::value_object::app_secret::AppSecret;
use auth::{AuthService, JwtTokenIssuer, PgCredentialStore, auth_router};
use axum::Router;
use axum::http::StatusCode;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::{ApiConfig, AppEnv};

fn init_logging(env: AppEnv) {
    let default_filter = match env {
        AppEnv::Local | AppEnv::Dev => "api=debug,auth=debug,tower_http=debug",
        AppEnv::Prod => "api=info,auth=info,tower_http=info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env {
        AppEnv::Local => builder.pretty().init(),
        AppEnv::Dev => builder.json().init(),
        AppEnv::Prod => builder.with_target(false).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_logging(config.env);

    tracing::info!(env = ?config.env, "starting application");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth service: one store backs every capability
    let store = Arc::new(PgCredentialStore::new(pool.clone()));
    let issuer = match config.token_fallback_secret.clone() {
        Some(secret) => JwtTokenIssuer::new().with_fallback_secret(AppSecret::new(secret)),
        None => JwtTokenIssuer::new(),
    };
    let service = AuthService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(issuer),
        config.auth_config(),
    )?;

    // Build router
    let app = Router::new()
        .merge(auth_router(Arc::new(service)))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("application stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "stopping application"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "stopping application"),
    }
}
