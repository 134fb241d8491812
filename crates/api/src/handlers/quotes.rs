//! Handlers for the quotes API.
//!
//! Provides listing, full-record update, delete, and JSON/CSV export of the
//! most recent quotes. Records are only ever created by the background
//! generation job, never through these endpoints.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quoteloom_core::error::CoreError;
use quoteloom_core::export::{build_csv, ExportFormat, EXPORT_COLUMNS};
use quoteloom_core::types::DbId;
use quoteloom_db::models::quote::{QuoteListParams, QuoteRecord, UpdateQuote};
use quoteloom_db::repositories::quote_repo::RECENT_LIMIT;
use quoteloom_db::repositories::QuoteRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/quotes?shorts_only=<bool>
///
/// Up to ten most recent quotes, optionally only those of at most 40
/// characters.
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> AppResult<Json<Vec<QuoteRecord>>> {
    let quotes = QuoteRepo::list_recent(&state.pool, RECENT_LIMIT, params.shorts_only).await?;
    Ok(Json(quotes))
}

/// PUT /api/quotes/{id}
pub async fn update_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<DbId>,
    Json(input): Json<UpdateQuote>,
) -> AppResult<Json<QuoteRecord>> {
    let quote = QuoteRepo::update(&state.pool, quote_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: quote_id,
        }))?;

    tracing::info!(quote_id, "Quote updated");

    Ok(Json(quote))
}

/// DELETE /api/quotes/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = QuoteRepo::delete(&state.pool, quote_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: quote_id,
        }));
    }

    tracing::info!(quote_id, "Quote deleted");

    Ok(Json(MessageResponse {
        message: "Quote deleted successfully",
    }))
}

/// GET /api/quotes/export/{format}
///
/// Download the ten most recent quotes as `json` or `csv`. Any other format
/// is rejected with 400 before the database is touched.
pub async fn export_quotes(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> AppResult<Response> {
    let format: ExportFormat = format.parse()?;
    let quotes = QuoteRepo::list_recent(&state.pool, RECENT_LIMIT, false).await?;

    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&quotes)
            .map_err(|e| AppError::InternalError(format!("JSON export failed: {e}")))?,
        ExportFormat::Csv => {
            let rows: Vec<Vec<String>> = quotes.iter().map(QuoteRecord::export_fields).collect();
            build_csv(&EXPORT_COLUMNS, &rows)
        }
    };

    tracing::info!(?format, count = quotes.len(), "Quotes exported");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, format.content_type()),
            (CONTENT_DISPOSITION, format.content_disposition()),
        ],
        body,
    )
        .into_response())
}
