// src/main.rs

use std::str::FromStr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use organizador::api::http::http_router;
use organizador::config::CONFIG;
use organizador::{AppState, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = Level::from_str(&CONFIG.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Organizador task API");
    info!("Database: {}", CONFIG.database_url);

    // Create database pool and ensure schema
    let pool = db::create_pool(&CONFIG.database_url, CONFIG.sqlite_max_connections).await?;
    db::run_migrations(&pool).await?;

    let app_state = Arc::new(AppState::new(
        pool,
        CONFIG.title_search_case_insensitive,
    ));

    let app = http_router(app_state).layer(TraceLayer::new_for_http());

    // Start server
    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
