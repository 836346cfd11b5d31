//! Memo Server
//!
//! A small HTTP service for storing and listing text memos.
//!
//! Uses SQLite (embedded) so it runs without an external database server.

mod handlers;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Memo Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    // Load configuration
    let config = load_config()
        .await
        .context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_url
    );

    // Initialize SQLite database; the memos table is created here,
    // before the listener is bound.
    let db = Arc::new(
        Database::new(&config.database_url)
            .await
            .context("Failed to initialize database")?,
    );
    info!("Database initialized at: {}", config.database_url);

    let state = AppState { db };

    // Build router
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Memo routes
        .route(
            "/memos/",
            get(handlers::memos::list).post(handlers::memos::create),
        )
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_url: String,
}

async fn load_config() -> Result<Config> {
    // Data directory holds the fallback SQLite file
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            warn!("DATABASE_URL not set, falling back to a local SQLite file (not for production)");
            tokio::fs::create_dir_all(&data_dir).await.with_context(|| {
                format!("Failed to create data directory {}", data_dir.display())
            })?;
            format!(
                "sqlite://{}?mode=rwc",
                data_dir.join("memos.db").to_string_lossy()
            )
        }
    };

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    Ok(Config {
        bind_address,
        database_url,
    })
}
