//! Periodic quote generation.
//!
//! Every [`GENERATION_INTERVAL`] the job synthesizes one quote and its image
//! prompt from the catalog and stores the result. A tick whose synthesis fails
//! is skipped without writing anything; a tick whose insert fails is logged.
//! Neither stops the loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use quoteloom_core::catalog::Catalog;
use quoteloom_core::error::SynthesisError;
use quoteloom_core::prompt::synthesize_prompt;
use quoteloom_core::quote::synthesize_quote;
use quoteloom_db::models::quote::{CreateQuote, QuoteRecord};
use quoteloom_db::repositories::QuoteRepo;
use quoteloom_db::DbPool;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// How often a new quote is generated.
pub const GENERATION_INTERVAL: Duration = Duration::from_secs(10);

/// Synthesis inputs and random source for the generation job.
pub struct QuoteGenerator {
    catalog: Arc<Catalog>,
    rng: StdRng,
    shorts_mode: bool,
    offset: FixedOffset,
}

/// What a single tick did.
#[derive(Debug)]
pub enum TickOutcome {
    Stored(QuoteRecord),
    Skipped(SynthesisError),
}

impl QuoteGenerator {
    pub fn new(catalog: Arc<Catalog>, rng: StdRng, shorts_mode: bool, offset: FixedOffset) -> Self {
        Self {
            catalog,
            rng,
            shorts_mode,
            offset,
        }
    }

    /// Production wiring: seed the generator from the operating system.
    pub fn from_os_rng(catalog: Arc<Catalog>, shorts_mode: bool, offset: FixedOffset) -> Self {
        Self::new(catalog, StdRng::from_os_rng(), shorts_mode, offset)
    }

    /// Run both synthesizers and build the record to insert.
    ///
    /// The prompt synthesizer only runs once a quote has been produced.
    pub fn generate(&mut self, now: DateTime<Utc>) -> Result<CreateQuote, SynthesisError> {
        let quote = synthesize_quote(&self.catalog, &mut self.rng, self.shorts_mode)?;
        let prompt = synthesize_prompt(&self.catalog, &mut self.rng, &quote.text, &quote.author)?;

        tracing::debug!(
            theme = %quote.theme,
            scene = prompt.scene.as_str(),
            quote = %quote.text,
            author = %quote.author,
            "Synthesized quote"
        );

        Ok(CreateQuote {
            timestamp: now.with_timezone(&self.offset),
            quote: quote.text,
            author: quote.author,
            image_prompt: prompt.text,
            image_style: prompt.style,
            keywords: quote.keywords,
        })
    }

    /// Generate one record and persist it.
    pub async fn generate_and_store(&mut self, pool: &DbPool) -> Result<TickOutcome, sqlx::Error> {
        let input = match self.generate(Utc::now()) {
            Ok(input) => input,
            Err(e) => return Ok(TickOutcome::Skipped(e)),
        };

        let record = QuoteRepo::create(pool, &input).await?;
        Ok(TickOutcome::Stored(record))
    }
}

/// Ticker for the generation loop.
///
/// After a stall (e.g. a busy database) the next tick is pushed back rather
/// than fired in a burst, so stored quotes stay [`GENERATION_INTERVAL`] apart.
pub fn generation_interval() -> Interval {
    let mut interval = tokio::time::interval(GENERATION_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Run the quote generation loop until `cancel` is triggered.
///
/// The first tick fires immediately.
pub async fn run(pool: DbPool, mut generator: QuoteGenerator, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = GENERATION_INTERVAL.as_secs(),
        shorts_mode = generator.shorts_mode,
        "Quote generation job started"
    );

    let mut interval = generation_interval();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Quote generation job stopping");
                break;
            }
            _ = interval.tick() => {
                match generator.generate_and_store(&pool).await {
                    Ok(TickOutcome::Stored(record)) => {
                        tracing::info!(quote_id = record.id, "Quote generation: saved quote");
                    }
                    Ok(TickOutcome::Skipped(e)) => {
                        tracing::warn!(error = %e, "Quote generation: synthesis failed, tick skipped");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Quote generation: failed to store quote");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn generate_builds_a_complete_record() {
        let catalog = Arc::new(Catalog::builtin());
        let mut generator =
            QuoteGenerator::new(Arc::clone(&catalog), StdRng::seed_from_u64(11), true, ist());

        let now = Utc::now();
        let input = generator.generate(now).unwrap();

        assert_eq!(input.timestamp, now);
        assert_eq!(input.timestamp.offset(), &ist());
        assert!(input.quote.chars().count() <= 40);
        assert!(catalog.authors.contains(&input.author));
        assert!(catalog.styles.contains(&input.image_style));
        assert!(input.image_prompt.contains(&input.author));
        assert!(input.image_prompt.starts_with(&format!("A {} ", input.image_style)));
        assert!(catalog
            .templates
            .iter()
            .any(|t| t.keyword_string() == input.keywords));
    }

    #[test]
    fn seeded_generators_agree() {
        let catalog = Arc::new(Catalog::builtin());
        let now = Utc::now();
        let a = QuoteGenerator::new(Arc::clone(&catalog), StdRng::seed_from_u64(5), false, ist())
            .generate(now)
            .unwrap();
        let b = QuoteGenerator::new(catalog, StdRng::seed_from_u64(5), false, ist())
            .generate(now)
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn interval_delays_missed_ticks() {
        let interval = generation_interval();
        assert_eq!(interval.period(), GENERATION_INTERVAL);
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Delay);
    }

    #[test]
    fn prompt_failure_fails_the_whole_generation() {
        let mut catalog = Catalog::builtin();
        catalog.styles.clear();
        let mut generator =
            QuoteGenerator::new(Arc::new(catalog), StdRng::seed_from_u64(0), true, ist());

        assert_eq!(generator.generate(Utc::now()), Err(SynthesisError::NoStyles));
    }
}
