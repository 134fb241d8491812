//! Quote record model and DTOs.

use quoteloom_core::types::{DbId, Timestamp};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quotes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct QuoteRecord {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub quote: String,
    pub author: String,
    pub image_prompt: String,
    pub image_style: String,
    pub keywords: String,
}

impl QuoteRecord {
    /// Field values in export column order, as written to CSV.
    pub fn export_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.timestamp.to_rfc3339(),
            self.quote.clone(),
            self.author.clone(),
            self.image_prompt.clone(),
            self.image_style.clone(),
            self.keywords.clone(),
        ]
    }
}

/// Everything needed to insert a record; the id is assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateQuote {
    pub timestamp: Timestamp,
    pub quote: String,
    pub author: String,
    pub image_prompt: String,
    pub image_style: String,
    pub keywords: String,
}

/// Full replacement of a record's text fields. Id and timestamp never change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateQuote {
    pub quote: String,
    pub author: String,
    pub image_prompt: String,
    pub image_style: String,
    pub keywords: String,
}

/// Query parameters for `GET /api/quotes`.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteListParams {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub shorts_only: bool,
}

/// Parse a query-string flag, case-insensitively.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        de::Error::invalid_value(de::Unexpected::Str(&raw), &"a boolean such as true, 1, yes or on")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "0", "no", "OFF"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
    }

    #[test]
    fn parse_flag_rejects_anything_else() {
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("2"), None);
    }
}
