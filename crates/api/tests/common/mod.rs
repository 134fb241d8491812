#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{FixedOffset, TimeZone};
use http_body_util::BodyExt;
use quoteloom_api::config::ServerConfig;
use quoteloom_api::router::build_app_router;
use quoteloom_api::state::AppState;
use quoteloom_api::templates::build_templates;
use quoteloom_db::models::quote::{CreateQuote, QuoteRecord};
use quoteloom_db::repositories::QuoteRepo;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:8000".to_string()],
        request_timeout_secs: 30,
        shorts_mode: true,
        display_offset: ist(),
        display_timezone_label: "IST".to_string(),
        catalog_path: None,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../static").to_string(),
    }
}

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(330 * 60).unwrap()
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        templates: Arc::new(build_templates().unwrap()),
    };
    build_app_router(state, &config)
}

/// Insert a quote stamped at 09:`minute` IST on a fixed day.
pub async fn seed_quote(pool: &SqlitePool, quote: &str, minute: u32) -> QuoteRecord {
    let input = CreateQuote {
        timestamp: ist().with_ymd_and_hms(2025, 3, 14, 9, minute, 0).unwrap(),
        quote: quote.to_string(),
        author: "Modern Visionary".to_string(),
        image_prompt: format!("A cinematic cityscape at twilight, minute {minute}"),
        image_style: "cinematic".to_string(),
        keywords: "motivation,success,growth".to_string(),
    };
    QuoteRepo::create(pool, &input).await.unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Split CSV text into rows of fields, honouring double-quoted fields.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) => in_quotes = true,
            (',', false) => row.push(std::mem::take(&mut field)),
            ('\r', false) => {}
            ('\n', false) => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            (c, _) => field.push(c),
        }
    }

    rows
}
