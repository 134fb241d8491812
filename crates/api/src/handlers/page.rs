//! Handler for the HTML quotes page.

use axum::extract::State;
use axum::response::Html;
use quoteloom_db::models::quote::QuoteRecord;
use quoteloom_db::repositories::quote_repo::RECENT_LIMIT;
use quoteloom_db::repositories::QuoteRepo;
use serde::Serialize;
use tera::Context;

use crate::error::AppResult;
use crate::state::AppState;
use crate::templates::INDEX_TEMPLATE;

const PAGE_TITLE: &str = "Inspirational Quote Generator";
const FALLBACK_DESCRIPTION: &str = "Inspirational quotes updated every 10 seconds.";
const FALLBACK_OG_DESCRIPTION: &str = "Discover new quotes for motivation and YouTube content!";

/// A record plus its pre-formatted generation time.
#[derive(Serialize)]
struct QuoteCard<'a> {
    #[serde(flatten)]
    record: &'a QuoteRecord,
    generated_at: String,
}

/// GET /
///
/// Render the ten most recent quotes. Page metadata is taken from the newest
/// quote when there is one.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let quotes = QuoteRepo::list_recent(&state.pool, RECENT_LIMIT, false).await?;
    let config = &state.config;

    let cards: Vec<QuoteCard<'_>> = quotes
        .iter()
        .map(|record| QuoteCard {
            record,
            generated_at: config.format_clock(&record.timestamp.with_timezone(&config.display_offset)),
        })
        .collect();

    let latest = quotes.first().map(|q| q.quote.as_str());

    let mut context = Context::new();
    context.insert("quotes", &cards);
    context.insert("meta_description", latest.unwrap_or(FALLBACK_DESCRIPTION));
    context.insert("og_title", PAGE_TITLE);
    context.insert("og_description", latest.unwrap_or(FALLBACK_OG_DESCRIPTION));
    context.insert("current_time", &config.format_clock(&config.now()));

    let html = state.templates.render(INDEX_TEMPLATE, &context)?;

    Ok(Html(html))
}
