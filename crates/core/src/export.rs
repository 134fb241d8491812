//! Export formats for the recent-quotes download.

use std::str::FromStr;

use crate::error::CoreError;

/// Column order of every CSV export.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "id",
    "timestamp",
    "quote",
    "author",
    "image_prompt",
    "image_style",
    "keywords",
];

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    pub fn content_disposition(self) -> &'static str {
        match self {
            Self::Json => "attachment; filename=\"quotes.json\"",
            Self::Csv => "attachment; filename=\"quotes.csv\"",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(CoreError::Validation(
                "Invalid format. Use 'json' or 'csv'.".to_string(),
            )),
        }
    }
}

/// Build a CSV document: a header row, then one line per row, each
/// terminated by CRLF.
pub fn build_csv<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = String::new();

    let header_line: Vec<String> = header.iter().map(|h| csv_escape(h)).collect();
    out.push_str(&header_line.join(","));
    out.push_str("\r\n");

    for row in rows {
        let line: Vec<String> = row.iter().map(|v| csv_escape(v.as_ref())).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field if it contains a comma, double quote, CR or LF.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
