//! Revision history extractor: version rows from a kernel's history panel

use crate::extract::parse_selector;
use crate::extract::schema::RevisionSchema;
use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html};
use url::Url;

/// One committed snapshot of a kernel, with a navigable URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionDescriptor {
    /// Version label as displayed (e.g. "Version 3")
    pub label: String,

    /// Commit timestamp label as displayed
    pub committed_at: String,

    /// Absolute URL of the revision snapshot
    pub url: String,
}

/// Extracts the revision rows of an open version-history panel, in DOM order
///
/// Only direct children of the versions container count as rows, so nested
/// elements inside a row never surface as rows of their own. A row's label
/// comes from its second anchor and its timestamp from the first direct-child
/// `span`. Rows whose anchor carries no href are dropped without error: they
/// are revisions with no navigable snapshot (typically the one currently open
/// in the editor).
pub fn extract_revisions(
    html: &str,
    schema: &RevisionSchema,
    base: &Url,
) -> Result<Vec<RevisionDescriptor>> {
    let document = Html::parse_document(html);
    let table_selector = parse_selector(&schema.table)?;
    let row_selector = parse_selector(&schema.row)?;
    let anchor_selector = parse_selector("a")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ScrapeError::Extraction {
            field: "revisions.table".to_string(),
            context: "version history panel".to_string(),
        })?;

    let mut revisions = Vec::new();
    for row in table.select(&row_selector) {
        // Rows are direct children of the container
        if row.parent().map(|parent| parent.id()) != Some(table.id()) {
            continue;
        }

        // Second anchor holds the version label and the snapshot link
        let Some(anchor) = row.select(&anchor_selector).nth(1) else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let label = anchor.text().collect::<String>().trim().to_string();
        let committed_at = direct_child_span_text(row);
        let url = base.join(href)?.to_string();

        revisions.push(RevisionDescriptor {
            label,
            committed_at,
            url,
        });
    }

    Ok(revisions)
}

/// Text of the row's first direct-child `span` (the commit timestamp)
///
/// Empty when the row has no such span; a missing timestamp is not grounds
/// for dropping an otherwise navigable revision.
fn direct_child_span_text(row: ElementRef<'_>) -> String {
    row.children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
