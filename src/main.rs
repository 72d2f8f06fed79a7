//! EventPro - Application Entry Point
//!
//! This is the main entry point for the EventPro server.

use std::net::SocketAddr;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventpro::{
    config::CONFIG,
    constants::MAX_REQUEST_BODY_BYTES,
    db,
    handlers,
    middleware::logging_middleware,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EventPro server...");

    // Initialize database connection pool
    tracing::info!("Opening database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Seed parameters and houses on first run
    db::seed_defaults(&db_pool, &CONFIG.judging).await?;

    // Create application state
    let state = AppState::new(db_pool);

    // Build the router
    let app = Router::new()
        .nest("/api/v1", handlers::routes())
        .route_layer(middleware::from_fn(logging_middleware))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
