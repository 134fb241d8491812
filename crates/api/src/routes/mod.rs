pub mod health;
pub mod page;
pub mod quotes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /quotes                       list (GET, ?shorts_only=)
/// /quotes/{id}                  update (PUT), delete (DELETE)
/// /quotes/export/{format}       download json | csv (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/quotes", quotes::router())
}
