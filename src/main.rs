use crate::config::BookshelfConfig;
use crate::database::BookRepository;
use crate::database::sqlite::SqliteRepository;
use crate::features::assets::{disable_caching, static_files};
use anyhow::{Context, Result};
use axum::Router;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub mod config;
mod database;
mod domain;
mod error;
mod features;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BookRepository>,
    pub config: Arc<BookshelfConfig>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_server=debug,tower_http=info")),
        )
        .init();

    // load centralized config
    let config = BookshelfConfig::from_env();
    let shared_config = Arc::new(config.clone());

    let pool = open_pool(&config).await?;

    let app_state = AppState {
        repo: Arc::new(SqliteRepository::new(pool.clone())),
        config: shared_config,
    };

    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    tracing::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn open_pool(config: &BookshelfConfig) -> Result<sqlx::Pool<Sqlite>> {
    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::warn!(
            "No database at {}, creating an empty catalog",
            config.database_url
        );
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // connect to our db
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Connected to catalog at {}", config.database_url);

    Ok(pool)
}

pub fn build_app(state: AppState) -> Router {
    tracing::info!("Serving static files from {}", state.config.static_root.display());

    // api router, where features are composed
    let api_router = Router::new().nest("/books", features::books::books_router());

    let app = Router::new()
        .nest("/api", api_router)
        .fallback_service(static_files(&state.config.static_root))
        .with_state(state);

    disable_caching(app).layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
