use crate::config::types::Config;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates a configuration after parsing
///
/// Checks that numeric bounds make sense, that the WebDriver and base URLs are
/// well-formed, and that every CSS selector in the extraction schema parses.
/// Catching a bad selector here means a schema override fails at startup
/// instead of halfway through a run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper(config)?;
    validate_schema(config)?;
    Ok(())
}

fn validate_scraper(config: &Config) -> Result<(), ConfigError> {
    let scraper = &config.scraper;

    if scraper.wait_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "wait-timeout-secs must be at least 1".to_string(),
        ));
    }

    if scraper.max_concurrent_score_fetches == 0 {
        return Err(ConfigError::Validation(
            "max-concurrent-score-fetches must be at least 1".to_string(),
        ));
    }

    if scraper.score_fetch_attempts == 0 {
        return Err(ConfigError::Validation(
            "score-fetch-attempts must be at least 1".to_string(),
        ));
    }

    Url::parse(&scraper.webdriver_url).map_err(|e| {
        ConfigError::Validation(format!(
            "webdriver-url is not a valid URL ({}): {}",
            scraper.webdriver_url, e
        ))
    })?;

    Url::parse(&scraper.base_url).map_err(|e| {
        ConfigError::Validation(format!(
            "base-url is not a valid URL ({}): {}",
            scraper.base_url, e
        ))
    })?;

    Ok(())
}

fn validate_schema(config: &Config) -> Result<(), ConfigError> {
    let listing = &config.schema.listing;
    let revisions = &config.schema.revisions;

    check_selector("listing.sort-control", &listing.sort_control)?;
    check_selector("listing.sort-menu", &listing.sort_menu)?;
    check_selector("listing.sort-option", &listing.sort_option)?;
    check_selector("listing.card-anchor-marker", &listing.card_anchor_marker)?;
    check_selector("listing.card", &listing.card)?;
    check_selector("listing.title", &listing.title.selector)?;
    check_selector("listing.link", &listing.link.selector)?;

    for (name, spec) in listing.metadata.fields() {
        check_selector(name, &spec.selector)?;
    }

    if listing.sort_option_label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "listing.sort-option-label must not be empty".to_string(),
        ));
    }

    check_selector("revisions.history-control", &revisions.history_control)?;
    check_selector("revisions.panel-marker", &revisions.panel_marker)?;
    check_selector("revisions.table", &revisions.table)?;
    check_selector("revisions.row", &revisions.row)?;

    Ok(())
}

fn check_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|_| {
        ConfigError::Validation(format!("schema entry `{}` is not a valid CSS selector: `{}`", name, selector))
    })?;
    Ok(())
}
