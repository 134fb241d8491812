use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quoteloom_api::background::quote_generation::{self, QuoteGenerator};
use quoteloom_api::config::ServerConfig;
use quoteloom_api::router::build_app_router;
use quoteloom_api::state::AppState;
use quoteloom_api::templates::build_templates;
use quoteloom_core::catalog::Catalog;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoteloom_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        shorts_mode = config.shorts_mode,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = quoteloom_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");
    tracing::info!("Database connection pool created");

    quoteloom_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    quoteloom_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = Catalog::from_json_file(path).expect("Failed to load CATALOG_PATH");
            tracing::info!(%path, templates = catalog.templates.len(), "Loaded template catalog");
            catalog
        }
        None => Catalog::builtin(),
    };
    let catalog = Arc::new(catalog);

    // --- Quote generation job ---
    let generation_cancel = CancellationToken::new();
    let generator =
        QuoteGenerator::from_os_rng(Arc::clone(&catalog), config.shorts_mode, config.display_offset);
    let generation_handle = tokio::spawn(quote_generation::run(
        pool.clone(),
        generator,
        generation_cancel.clone(),
    ));

    // --- App state ---
    let templates = build_templates().expect("Failed to compile page templates");
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        templates: Arc::new(templates),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    generation_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), generation_handle).await;
    tracing::info!("Quote generation job stopped");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
