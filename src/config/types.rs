use crate::extract::schema::ExtractionSchema;
use serde::Deserialize;

/// Main configuration structure for Kernel-Profiler
///
/// All fields carry Kaggle-appropriate defaults; a TOML file is only needed to
/// override them (typically the extraction schema, after a site redesign).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub schema: ExtractionSchema,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// WebDriver endpoint to connect the browser session to
    #[serde(rename = "webdriver-url")]
    pub webdriver_url: String,

    /// Base URL relative card/revision links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-wait timeout for DOM markers (seconds)
    #[serde(rename = "wait-timeout-secs")]
    pub wait_timeout_secs: u64,

    /// Upper bound on concurrent revision-score fetches
    #[serde(rename = "max-concurrent-score-fetches")]
    pub max_concurrent_score_fetches: usize,

    /// Attempts per revision-score fetch (transient failures only)
    #[serde(rename = "score-fetch-attempts")]
    pub score_fetch_attempts: u32,

    /// What to do when a listing card is missing a required field
    #[serde(rename = "on-card-error")]
    pub on_card_error: CardErrorPolicy,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            base_url: "https://www.kaggle.com".to_string(),
            wait_timeout_secs: 15,
            max_concurrent_score_fetches: 4,
            score_fetch_attempts: 3,
            on_card_error: CardErrorPolicy::Abort,
        }
    }
}

/// Policy for listing cards that fail metadata extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardErrorPolicy {
    /// Abort the whole run (matches the observed upstream behavior)
    Abort,
    /// Log a warning and drop the kernel from the report
    Skip,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the markdown report is written to (overwritten each run)
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "result.md".to_string(),
        }
    }
}
