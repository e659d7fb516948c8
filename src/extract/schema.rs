//! Declarative extraction schema
//!
//! Every selector the scraper relies on lives in this one table instead of
//! being scattered through the extraction code. When the platform's DOM
//! changes, the fix is a single schema entry (editable from the TOML config)
//! rather than a hunt through the extractors.

use scraper::{ElementRef, Selector};
use serde::Deserialize;

/// How to resolve one named field within a scope element
///
/// With `attr` absent the field is the element's text content; otherwise the
/// named attribute's value. Either way the result is trimmed.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FieldSpec {
    pub selector: String,
    pub attr: Option<String>,
}

impl FieldSpec {
    /// A spec resolving to the text content of the first match
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attr: None,
        }
    }

    /// A spec resolving to an attribute value of the first match
    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attr: Some(attr.to_string()),
        }
    }

    /// Resolves this spec within the given scope element
    ///
    /// Returns `None` when the selector matches nothing or the requested
    /// attribute is absent; the caller decides whether that is an error.
    pub fn resolve(&self, scope: ElementRef<'_>) -> Option<String> {
        let selector = Selector::parse(&self.selector).ok()?;
        let node = scope.select(&selector).next()?;
        let raw = match &self.attr {
            Some(attr) => node.value().attr(attr)?.to_string(),
            None => node.text().collect::<String>(),
        };
        Some(raw.trim().to_string())
    }
}

/// Selectors for the kernel-listing page and its sort-by-best-score sequence
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingSchema {
    /// The "Sort By" select box
    #[serde(rename = "sort-control")]
    pub sort_control: String,

    /// The opened sort menu
    #[serde(rename = "sort-menu")]
    pub sort_menu: String,

    /// Entries inside the sort menu, discriminated by visible text
    #[serde(rename = "sort-option")]
    pub sort_option: String,

    /// Visible text of the option that sorts by best score
    #[serde(rename = "sort-option-label")]
    pub sort_option_label: String,

    /// Marker signalling the re-sorted listing has rendered
    #[serde(rename = "card-anchor-marker")]
    pub card_anchor_marker: String,

    /// One kernel card
    pub card: String,

    /// Kernel title within a card
    pub title: FieldSpec,

    /// Kernel link within a card (relative href)
    pub link: FieldSpec,

    pub metadata: MetadataSchema,
}

impl Default for ListingSchema {
    fn default() -> Self {
        Self {
            sort_control: "div.KaggleSelect".to_string(),
            sort_menu: "div.Select-menu-outer".to_string(),
            sort_option: "div.Select-menu-outer div".to_string(),
            sort_option_label: "Best Score".to_string(),
            card_anchor_marker: "a.block-link__anchor".to_string(),
            card: "div.block-link--bordered".to_string(),
            title: FieldSpec::text("div.kernel-list-item__name"),
            link: FieldSpec::attr("a.block-link__anchor", "href"),
            metadata: MetadataSchema::default(),
        }
    }
}

/// The seven metadata fields extracted from every kernel card
///
/// All values are kept as display text; no numeric coercion happens here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataSchema {
    #[serde(rename = "author-name")]
    pub author_name: FieldSpec,
    #[serde(rename = "author-url")]
    pub author_url: FieldSpec,
    #[serde(rename = "avatar-url")]
    pub avatar_url: FieldSpec,
    #[serde(rename = "vote-count")]
    pub vote_count: FieldSpec,
    #[serde(rename = "comment-count")]
    pub comment_count: FieldSpec,
    #[serde(rename = "last-updated")]
    pub last_updated: FieldSpec,
    #[serde(rename = "best-score")]
    pub best_score: FieldSpec,
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self {
            author_name: FieldSpec::attr("span.tooltip-container", "data-tooltip"),
            author_url: FieldSpec::attr("a.avatar", "href"),
            avatar_url: FieldSpec::attr("img.avatar__thumbnail", "src"),
            vote_count: FieldSpec::text("span.vote-button__vote-count"),
            comment_count: FieldSpec::text("a.kernel-list-item__info-block--comment"),
            last_updated: FieldSpec::text("div.kernel-list-item__details > span"),
            best_score: FieldSpec::text("div.kernel-list-item__score"),
        }
    }
}

impl MetadataSchema {
    /// Field name / spec pairs, in the order they appear in the report
    pub fn fields(&self) -> [(&'static str, &FieldSpec); 7] {
        [
            ("author_name", &self.author_name),
            ("author_url", &self.author_url),
            ("avatar_url", &self.avatar_url),
            ("vote_count", &self.vote_count),
            ("comment_count", &self.comment_count),
            ("last_updated", &self.last_updated),
            ("best_score", &self.best_score),
        ]
    }
}

/// Selectors for a kernel's version-history panel
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevisionSchema {
    /// Control that opens the version-history panel
    #[serde(rename = "history-control")]
    pub history_control: String,

    /// Marker confirming the panel has rendered
    #[serde(rename = "panel-marker")]
    pub panel_marker: String,

    /// The versions table (class name carries a build hash, so substring
    /// match; tag left unspecified because the platform renders div rows as
    /// non-conforming table content, which an HTML5 reparse relocates)
    pub table: String,

    /// One revision row, matched among the table's direct children only
    pub row: String,
}

impl Default for RevisionSchema {
    fn default() -> Self {
        Self {
            history_control: "span.fa-history".to_string(),
            panel_marker: "div.vote-button__voters-modal-title".to_string(),
            table: r#"[class*="VersionsPaneContent_IdeVersionsTable"]"#.to_string(),
            row: "div".to_string(),
        }
    }
}

/// Complete extraction schema: listing page plus revision panel
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionSchema {
    pub listing: ListingSchema,
    pub revisions: RevisionSchema,
}
