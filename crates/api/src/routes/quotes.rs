//! Route definitions for the quotes API.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::quotes;
use crate::state::AppState;

/// Quote routes mounted at `/api/quotes`.
///
/// ```text
/// GET    /                  -> list_quotes
/// PUT    /{id}              -> update_quote
/// DELETE /{id}              -> delete_quote
/// GET    /export/{format}   -> export_quotes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quotes::list_quotes))
        .route("/{id}", put(quotes::update_quote).delete(quotes::delete_quote))
        .route("/export/{format}", get(quotes::export_quotes))
}
