//! Integration tests for the background quote generation job.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::FixedOffset;
use quoteloom_api::background::quote_generation::{self, QuoteGenerator, TickOutcome};
use quoteloom_core::catalog::{Catalog, QuoteTemplate};
use quoteloom_core::error::SynthesisError;
use quoteloom_db::repositories::QuoteRepo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

fn ist() -> FixedOffset {
    FixedOffset::east_opt(330 * 60).unwrap()
}

fn fixed_sentence_catalog(sentence: &str) -> Catalog {
    Catalog {
        templates: vec![QuoteTemplate {
            theme: "inspiration".to_string(),
            skeleton: sentence.to_string(),
            words: Default::default(),
            keywords: vec!["inspiration".to_string(), "hope".to_string()],
        }],
        authors: vec!["Inspirational Leader".to_string()],
        styles: vec!["classic painting".to_string()],
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tick_stores_a_record(pool: SqlitePool) {
    let mut generator = QuoteGenerator::new(
        Arc::new(Catalog::builtin()),
        StdRng::seed_from_u64(42),
        true,
        ist(),
    );

    let outcome = generator.generate_and_store(&pool).await.unwrap();
    let record = assert_matches!(outcome, TickOutcome::Stored(record) => record);

    let stored = QuoteRepo::find_by_id(&pool, record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
    assert_eq!(stored.timestamp.offset(), &ist());
    assert!(!stored.quote.is_empty());
    assert!(!stored.image_prompt.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn long_quote_is_stored_truncated_in_shorts_mode(pool: SqlitePool) {
    let catalog = fixed_sentence_catalog(
        "Courageous hearts, forge ahead with unwavering determination to achieve greatness.",
    );
    let mut generator =
        QuoteGenerator::new(Arc::new(catalog), StdRng::seed_from_u64(0), true, ist());

    let outcome = generator.generate_and_store(&pool).await.unwrap();
    let record = assert_matches!(outcome, TickOutcome::Stored(record) => record);

    assert_eq!(record.quote, "Courageous hearts, forge ahead with u...");
    assert_eq!(record.quote.chars().count(), 40);
    assert_eq!(record.keywords, "inspiration,hope");
    assert_eq!(record.image_style, "classic painting");
    // "Courageous" contains "courage", so the warrior scene is used.
    assert!(record.image_prompt.contains("lone warrior"));
    assert!(record.image_prompt.contains("Inspirational Leader's words"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_synthesis_skips_the_tick(pool: SqlitePool) {
    let mut catalog = Catalog::builtin();
    catalog.authors.clear();
    let mut generator =
        QuoteGenerator::new(Arc::new(catalog), StdRng::seed_from_u64(0), true, ist());

    let outcome = generator.generate_and_store(&pool).await.unwrap();

    assert_matches!(outcome, TickOutcome::Skipped(SynthesisError::NoAuthors));
    assert_eq!(QuoteRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_generates_on_first_tick_and_stops_on_cancel(pool: SqlitePool) {
    let generator = QuoteGenerator::new(
        Arc::new(Catalog::builtin()),
        StdRng::seed_from_u64(9),
        true,
        ist(),
    );
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(quote_generation::run(pool.clone(), generator, cancel.clone()));

    let stored = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let count = QuoteRepo::count(&pool).await.unwrap();
            if count > 0 {
                break count;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("first tick should store a quote immediately");
    assert_eq!(stored, 1);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("job should stop after cancellation")
        .unwrap();
}
