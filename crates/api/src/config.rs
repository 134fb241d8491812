use chrono::{FixedOffset, Utc};
use quoteloom_core::types::Timestamp;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running locally.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// SQLite connection string (default: `sqlite://quotes.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Cap generated quotes at 40 characters (default: `true`).
    pub shorts_mode: bool,
    /// Offset used for record timestamps and the page clock (default: UTC+05:30).
    pub display_offset: FixedOffset,
    /// Label printed after the page clock (default: `IST`).
    pub display_timezone_label: String,
    /// Optional JSON catalog replacing the built-in templates.
    pub catalog_path: Option<String>,
    /// Directory served under `/static` (default: `static`).
    pub static_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `8000`                   |
    /// | `DATABASE_URL`               | `sqlite://quotes.db`     |
    /// | `CORS_ORIGINS`               | `http://localhost:8000`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                     |
    /// | `SHORTS_MODE`                | `true`                   |
    /// | `DISPLAY_UTC_OFFSET_MINUTES` | `330`                    |
    /// | `DISPLAY_TIMEZONE_LABEL`     | `IST`                    |
    /// | `CATALOG_PATH`               | unset (built-in catalog) |
    /// | `STATIC_DIR`                 | `static`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quotes.db".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shorts_mode: bool = std::env::var("SHORTS_MODE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SHORTS_MODE must be `true` or `false`");

        let offset_minutes: i32 = std::env::var("DISPLAY_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "330".into())
            .parse()
            .expect("DISPLAY_UTC_OFFSET_MINUTES must be a valid i32");
        let display_offset = FixedOffset::east_opt(offset_minutes * 60)
            .expect("DISPLAY_UTC_OFFSET_MINUTES must be within one day");

        let display_timezone_label =
            std::env::var("DISPLAY_TIMEZONE_LABEL").unwrap_or_else(|_| "IST".into());

        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            shorts_mode,
            display_offset,
            display_timezone_label,
            catalog_path,
            static_dir,
        }
    }

    /// Current time in the display offset.
    pub fn now(&self) -> Timestamp {
        Utc::now().with_timezone(&self.display_offset)
    }

    /// Page clock text, e.g. `09:41 AM IST on Friday, March 14, 2025`.
    pub fn format_clock(&self, at: &Timestamp) -> String {
        format!(
            "{} {} on {}",
            at.format("%I:%M %p"),
            self.display_timezone_label,
            at.format("%A, %B %d, %Y")
        )
    }
}
