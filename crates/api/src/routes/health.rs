//! Liveness of the quote pipeline: is the background job still storing quotes?

use axum::extract::State;
use axum::{routing::get, Json, Router};
use quoteloom_core::types::Timestamp;
use quoteloom_db::repositories::QuoteRepo;
use serde::Serialize;

use crate::background::quote_generation::GENERATION_INTERVAL;
use crate::state::AppState;

/// Missed ticks after which the newest quote counts as stale.
const STALE_AFTER_TICKS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// A quote was stored within the last few ticks.
    Ok,
    /// Nothing has been stored yet.
    Starting,
    /// The newest quote is older than [`STALE_AFTER_TICKS`] intervals.
    Stale,
    /// The store could not be queried.
    Degraded,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: GenerationStatus,
    pub quote_count: Option<i64>,
    pub latest_quote_at: Option<Timestamp>,
    pub interval_secs: u64,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = async {
        let count = QuoteRepo::count(&state.pool).await?;
        let latest = QuoteRepo::latest_timestamp(&state.pool).await?;
        Ok::<_, sqlx::Error>((count, latest))
    }
    .await;

    let (status, quote_count, latest_quote_at) = match stats {
        Ok((count, None)) => (GenerationStatus::Starting, Some(count), None),
        Ok((count, Some(latest))) => {
            let age = state.config.now().signed_duration_since(latest);
            let stale_after =
                chrono::Duration::seconds((GENERATION_INTERVAL.as_secs() * STALE_AFTER_TICKS) as i64);
            let status = if age > stale_after {
                GenerationStatus::Stale
            } else {
                GenerationStatus::Ok
            };
            (status, Some(count), Some(latest))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read the quote store");
            (GenerationStatus::Degraded, None, None)
        }
    };

    Json(HealthResponse {
        status,
        quote_count,
        latest_quote_at,
        interval_secs: GENERATION_INTERVAL.as_secs(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
