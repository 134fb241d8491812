//! Repository for the `quotes` table.

use quoteloom_core::quote::SHORTS_MAX_CHARS;
use quoteloom_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::quote::{CreateQuote, QuoteRecord, UpdateQuote};

/// Column list for `quotes` queries.
const QUOTE_COLUMNS: &str = "id, timestamp, quote, author, image_prompt, image_style, keywords";

/// Chronological ordering that ignores how each timestamp's offset is written.
const NEWEST_FIRST: &str = "julianday(timestamp) DESC, id DESC";

/// Number of records shown on the page, listed by the API and exported.
pub const RECENT_LIMIT: i64 = 10;

/// Provides CRUD operations for synthesized quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a new record, returning it with its assigned id.
    pub async fn create(pool: &SqlitePool, input: &CreateQuote) -> Result<QuoteRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (timestamp, quote, author, image_prompt, image_style, keywords) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {QUOTE_COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRecord>(&query)
            .bind(input.timestamp)
            .bind(&input.quote)
            .bind(&input.author)
            .bind(&input.image_prompt)
            .bind(&input.image_style)
            .bind(&input.keywords)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<QuoteRecord>, sqlx::Error> {
        let query = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?1");
        sqlx::query_as::<_, QuoteRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List up to `limit` records, newest first.
    ///
    /// Timestamps may carry different UTC offsets, so rows are ordered by
    /// the instant (`julianday`) rather than by their RFC 3339 text.
    ///
    /// With `shorts_only`, only quotes of at most 40 characters are
    /// considered; the filter is applied before the limit. SQLite's
    /// `length()` counts characters for TEXT values.
    pub async fn list_recent(
        pool: &SqlitePool,
        limit: i64,
        shorts_only: bool,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes \
             WHERE ?1 = 0 OR length(quote) <= ?2 \
             ORDER BY {NEWEST_FIRST} \
             LIMIT ?3"
        );
        sqlx::query_as::<_, QuoteRecord>(&query)
            .bind(shorts_only)
            .bind(SHORTS_MAX_CHARS as i64)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every text field of a record.
    ///
    /// Returns `None` if no record with the given id exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateQuote,
    ) -> Result<Option<QuoteRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET \
                 quote = ?2, author = ?3, image_prompt = ?4, image_style = ?5, keywords = ?6 \
             WHERE id = ?1 \
             RETURNING {QUOTE_COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRecord>(&query)
            .bind(id)
            .bind(&input.quote)
            .bind(&input.author)
            .bind(&input.image_prompt)
            .bind(&input.image_style)
            .bind(&input.keywords)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Timestamp of the most recently generated record, if any.
    pub async fn latest_timestamp(pool: &SqlitePool) -> Result<Option<Timestamp>, sqlx::Error> {
        let query = format!("SELECT timestamp FROM quotes ORDER BY {NEWEST_FIRST} LIMIT 1");
        let row: Option<(Timestamp,)> = sqlx::query_as(&query).fetch_optional(pool).await?;
        Ok(row.map(|(timestamp,)| timestamp))
    }

    /// Total number of stored records.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
