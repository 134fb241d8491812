use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Mount the HTML page at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(page::index))
}
