//! Integration tests for the HTML quotes page.

mod common;

use axum::http::StatusCode;
use common::{body_text, get, seed_quote};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_uses_newest_quote_as_description(pool: SqlitePool) {
    seed_quote(&pool, "Older words.", 1).await;
    seed_quote(&pool, "Newest words.", 2).await;

    let response = get(common::build_test_app(pool), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains(r#"<meta name="description" content="Newest words.">"#));
    assert!(html.contains(r#"<meta property="og:description" content="Newest words.">"#));
    assert!(html.contains("<title>Inspirational Quote Generator</title>"));
    assert!(html.contains("Older words."));
    assert!(html.contains("09:02 AM IST on Friday, March 14, 2025"));
    assert!(html.contains(" IST on "));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_without_quotes_uses_fallback_metadata(pool: SqlitePool) {
    let response = get(common::build_test_app(pool), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Inspirational quotes updated every 10 seconds."));
    assert!(html.contains("Discover new quotes for motivation and YouTube content!"));
    assert!(html.contains("No quotes yet."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_escapes_stored_text(pool: SqlitePool) {
    seed_quote(&pool, "<script>alert(1)</script>", 1).await;

    let html = body_text(get(common::build_test_app(pool), "/").await).await;
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}
