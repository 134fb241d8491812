use std::sync::Arc;

use tera::Tera;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Handlers only read and mutate stored quotes; generation runs in the
/// background job and is not reachable from here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quoteloom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Compiled HTML templates.
    pub templates: Arc<Tera>,
}
