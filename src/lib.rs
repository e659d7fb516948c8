//! Kernel-Profiler: score progression reports for Kaggle competition kernels
//!
//! This crate scrapes the ranked listing of public solution notebooks for a
//! competition, walks each notebook's revision history, records the public
//! leaderboard score attached to every revision, and writes a single markdown
//! report summarizing all kernels and their score progression over time.

pub mod browser;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod score;

use thiserror::Error;

/// Main error type for Kernel-Profiler operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Timed out after {timeout_secs}s waiting for selector `{selector}`")]
    NavigationTimeout { selector: String, timeout_secs: u64 },

    #[error("Extraction failed for `{field}` ({context})")]
    Extraction { field: String, context: String },

    #[error("Invalid CSS selector: `{selector}`")]
    Selector { selector: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to open WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),

    #[error("Browser session already closed")]
    SessionClosed,

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Score fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Kernel-Profiler operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::BrowserSession;
pub use config::Config;
pub use extract::{KernelMetadata, KernelSummary, RevisionDescriptor};
pub use score::ScoreRecord;
