//! HTML extractors for the kernel listing and revision history
//!
//! Both extractors work on fully rendered HTML handed over by the browser
//! session, resolving fields through the declarative schema in
//! [`schema::ExtractionSchema`].

pub mod listing;
pub mod revisions;
pub mod schema;

pub use listing::{extract_kernels, KernelMetadata, KernelSummary};
pub use revisions::{extract_revisions, RevisionDescriptor};

use crate::{Result, ScrapeError};
use scraper::Selector;

/// Parses a CSS selector, mapping failures to a `ScrapeError`
///
/// Selectors are pre-validated at config load, so this failing mid-run means
/// the schema was mutated after validation; still surfaced as a typed error
/// rather than a panic.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector {
        selector: selector.to_string(),
    })
}
