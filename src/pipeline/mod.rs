//! Pipeline coordinator - drives the whole scrape
//!
//! Sequence per run:
//! 1. Navigate to the competition's kernel listing and sort it by best score
//! 2. Extract all kernel cards
//! 3. Per kernel: open the version-history panel, extract revision rows,
//!    fetch their scores (bounded concurrency), render a profile block
//! 4. Assemble the timestamped report and write it once
//!
//! The browser session is threaded through explicitly and released by the
//! caller on every exit path. If a kernel fails mid-run, profiles gathered so
//! far are persisted as a partial report before the error propagates; work
//! already done is never silently discarded.

use crate::browser::{BrowserSession, WebDriverSession};
use crate::config::Config;
use crate::extract::{extract_kernels, extract_revisions, KernelSummary};
use crate::report::{
    assemble_report, make_link, make_profile, make_table, write_report, TABLE_HEADER,
};
use crate::score::{build_http_client, fetch_revision_scores};
use crate::Result;
use std::path::Path;
use url::Url;

/// Builds the kernel-listing URL for a competition tag
pub fn competition_url(base: &Url, comp: &str) -> String {
    format!("{}/c/{}/notebooks", base.as_str().trim_end_matches('/'), comp)
}

/// Connects a WebDriver session, runs the pipeline, and guarantees the
/// session is released whether the run succeeded or not
pub async fn run(config: Config, comp: &str) -> Result<()> {
    let mut session = WebDriverSession::connect(&config.scraper.webdriver_url).await?;
    let http = build_http_client()?;

    let outcome = run_pipeline(&mut session, &http, &config, comp).await;

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    outcome
}

/// Runs the full scrape against an already-open browser session
///
/// Generic over [`BrowserSession`] so tests can drive it with a scripted
/// session instead of a live driver.
pub async fn run_pipeline<S: BrowserSession>(
    session: &mut S,
    http: &reqwest::Client,
    config: &Config,
    comp: &str,
) -> Result<()> {
    let base = Url::parse(&config.scraper.base_url)?;
    let listing_url = competition_url(&base, comp);
    let report_path = Path::new(&config.output.report_path);

    let kernels = load_listing(session, config, &base, &listing_url).await?;
    let total = kernels.len();
    tracing::info!("Found {} kernels for competition `{}`", total, comp);

    let mut profiles = Vec::with_capacity(total);
    for (index, kernel) in kernels.into_iter().enumerate() {
        tracing::info!("Processing {} ({} / {})", kernel.url, index + 1, total);

        match build_profile(session, http, config, &base, &kernel).await {
            Ok(profile) => profiles.push(profile),
            Err(e) => {
                if !profiles.is_empty() {
                    tracing::warn!(
                        "Aborting after {} of {} kernels; persisting partial report",
                        profiles.len(),
                        total
                    );
                    if let Err(write_err) = write_report(report_path, &assemble_report(&profiles))
                    {
                        tracing::error!("Could not persist partial report: {}", write_err);
                    }
                }
                return Err(e);
            }
        }
    }

    write_report(report_path, &assemble_report(&profiles))?;
    tracing::info!(
        "Wrote report with {} profiles to {}",
        profiles.len(),
        report_path.display()
    );

    Ok(())
}

/// Drives the listing page to a sorted, fully rendered state and extracts
/// the kernel cards
async fn load_listing<S: BrowserSession>(
    session: &mut S,
    config: &Config,
    base: &Url,
    listing_url: &str,
) -> Result<Vec<KernelSummary>> {
    let listing = &config.schema.listing;
    let timeout = config.scraper.wait_timeout_secs;

    session.navigate(listing_url).await?;

    // Open the sort menu and pick the best-score ordering
    session.await_marker(&listing.sort_control, timeout).await?;
    session.click(&listing.sort_control).await?;
    session.await_marker(&listing.sort_menu, timeout).await?;
    session
        .click_matching_text(&listing.sort_option, &listing.sort_option_label)
        .await?;

    // The listing re-renders after the sort; wait for the card anchors
    session
        .await_marker(&listing.card_anchor_marker, timeout)
        .await?;

    let html = session.current_html().await?;
    extract_kernels(&html, listing, base, config.scraper.on_card_error)
}

/// Opens one kernel's version-history panel, collects revision scores, and
/// renders the kernel's profile block
async fn build_profile<S: BrowserSession>(
    session: &mut S,
    http: &reqwest::Client,
    config: &Config,
    base: &Url,
    kernel: &KernelSummary,
) -> Result<String> {
    let revisions_schema = &config.schema.revisions;
    let timeout = config.scraper.wait_timeout_secs;

    session.navigate(&kernel.url).await?;
    session
        .await_marker(&revisions_schema.history_control, timeout)
        .await?;
    session.click(&revisions_schema.history_control).await?;
    session
        .await_marker(&revisions_schema.panel_marker, timeout)
        .await?;

    let html = session.current_html().await?;
    let revisions = extract_revisions(&html, revisions_schema, base)?;
    tracing::debug!("{}: {} navigable revisions", kernel.title, revisions.len());

    let records = fetch_revision_scores(
        http,
        &kernel.title,
        revisions,
        config.scraper.max_concurrent_score_fetches,
        config.scraper.score_fetch_attempts,
    )
    .await?;

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.title.clone(),
                record.version.clone(),
                record.score_cell(),
                record.committed_at.clone(),
                make_link("Open", &record.url),
            ]
        })
        .collect();

    let table = make_table(&TABLE_HEADER, &rows);
    let kernel_link = make_link(&kernel.title, &kernel.url);
    Ok(make_profile(&kernel_link, &table, &kernel.metadata))
}
