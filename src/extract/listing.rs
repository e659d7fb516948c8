//! Listing extractor: kernel cards from the rendered listing page

use crate::config::CardErrorPolicy;
use crate::extract::parse_selector;
use crate::extract::schema::{FieldSpec, ListingSchema};
use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html};
use url::Url;

/// The seven metadata fields of one kernel card, verbatim display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelMetadata {
    pub author_name: String,
    pub author_url: String,
    pub avatar_url: String,
    pub vote_count: String,
    pub comment_count: String,
    pub last_updated: String,
    pub best_score: String,
}

/// One kernel from the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSummary {
    /// Kernel title as displayed
    pub title: String,

    /// Absolute URL of the kernel page
    pub url: String,

    pub metadata: KernelMetadata,
}

/// Extracts all kernel cards from the rendered listing page, in DOM order
///
/// Every card must yield a title, a link, and all seven metadata fields. What
/// happens when one does not is governed by `on_card_error`: `Abort` fails the
/// whole extraction with the offending field and card index, `Skip` logs a
/// warning and drops just that kernel.
pub fn extract_kernels(
    html: &str,
    schema: &ListingSchema,
    base: &Url,
    on_card_error: CardErrorPolicy,
) -> Result<Vec<KernelSummary>> {
    let document = Html::parse_document(html);
    let card_selector = parse_selector(&schema.card)?;

    let mut kernels = Vec::new();
    for (index, card) in document.select(&card_selector).enumerate() {
        match extract_card(card, schema, base, index) {
            Ok(kernel) => kernels.push(kernel),
            Err(e) if on_card_error == CardErrorPolicy::Skip => {
                tracing::warn!("Skipping kernel card {}: {}", index, e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(kernels)
}

fn extract_card(
    card: ElementRef<'_>,
    schema: &ListingSchema,
    base: &Url,
    index: usize,
) -> Result<KernelSummary> {
    let title = resolve_required(&schema.title, card, "title", index)?;
    let href = resolve_required(&schema.link, card, "link", index)?;
    let url = base.join(&href)?.to_string();

    let meta = &schema.metadata;
    let metadata = KernelMetadata {
        author_name: resolve_required(&meta.author_name, card, "author_name", index)?,
        author_url: resolve_required(&meta.author_url, card, "author_url", index)?,
        avatar_url: resolve_required(&meta.avatar_url, card, "avatar_url", index)?,
        vote_count: resolve_required(&meta.vote_count, card, "vote_count", index)?,
        comment_count: resolve_required(&meta.comment_count, card, "comment_count", index)?,
        last_updated: resolve_required(&meta.last_updated, card, "last_updated", index)?,
        best_score: resolve_required(&meta.best_score, card, "best_score", index)?,
    };

    Ok(KernelSummary {
        title,
        url,
        metadata,
    })
}

fn resolve_required(
    spec: &FieldSpec,
    scope: ElementRef<'_>,
    field: &str,
    card_index: usize,
) -> Result<String> {
    spec.resolve(scope).ok_or_else(|| ScrapeError::Extraction {
        field: field.to_string(),
        context: format!("kernel card {}", card_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.kaggle.com").unwrap()
    }

    fn card_html(title: &str, href: &str) -> String {
        format!(
            r#"
            <div class="block-link--bordered">
                <a class="block-link__anchor" href="{href}"></a>
                <div class="kernel-list-item__name">{title}</div>
                <span class="tooltip-container" data-tooltip="Alice"></span>
                <a class="avatar" href="/alice"></a>
                <img class="avatar__thumbnail" src="/alice.png">
                <span class="vote-button__vote-count">42</span>
                <a class="kernel-list-item__info-block--comment">7 comments</a>
                <div class="kernel-list-item__details"><span>2 days ago</span></div>
                <div class="kernel-list-item__score">0.8134</div>
            </div>
            "#
        )
    }

    fn listing_html(cards: &[String]) -> String {
        format!("<html><body>{}</body></html>", cards.join("\n"))
    }

    #[test]
    fn test_extract_single_card() {
        let html = listing_html(&[card_html("Titanic EDA", "/alice/titanic-eda")]);
        let kernels = extract_kernels(
            &html,
            &ListingSchema::default(),
            &base(),
            CardErrorPolicy::Abort,
        )
        .unwrap();

        assert_eq!(kernels.len(), 1);
        let kernel = &kernels[0];
        assert_eq!(kernel.title, "Titanic EDA");
        assert_eq!(kernel.url, "https://www.kaggle.com/alice/titanic-eda");
        assert_eq!(kernel.metadata.author_name, "Alice");
        assert_eq!(kernel.metadata.author_url, "/alice");
        assert_eq!(kernel.metadata.avatar_url, "/alice.png");
        assert_eq!(kernel.metadata.vote_count, "42");
        assert_eq!(kernel.metadata.comment_count, "7 comments");
        assert_eq!(kernel.metadata.last_updated, "2 days ago");
        assert_eq!(kernel.metadata.best_score, "0.8134");
    }

    #[test]
    fn test_extract_preserves_dom_order() {
        let html = listing_html(&[
            card_html("First", "/a/first"),
            card_html("Second", "/b/second"),
            card_html("Third", "/c/third"),
        ]);
        let kernels = extract_kernels(
            &html,
            &ListingSchema::default(),
            &base(),
            CardErrorPolicy::Abort,
        )
        .unwrap();

        let titles: Vec<_> = kernels.iter().map(|k| k.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_missing_field_aborts_by_default() {
        // Card without a vote count
        let broken = card_html("Broken", "/x/broken")
            .replace(r#"<span class="vote-button__vote-count">42</span>"#, "");
        let html = listing_html(&[card_html("Fine", "/a/fine"), broken]);

        let result = extract_kernels(
            &html,
            &ListingSchema::default(),
            &base(),
            CardErrorPolicy::Abort,
        );

        match result {
            Err(ScrapeError::Extraction { field, context }) => {
                assert_eq!(field, "vote_count");
                assert!(context.contains("card 1"));
            }
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_skipped_when_lenient() {
        let broken = card_html("Broken", "/x/broken")
            .replace(r#"<span class="vote-button__vote-count">42</span>"#, "");
        let html = listing_html(&[card_html("Fine", "/a/fine"), broken]);

        let kernels = extract_kernels(
            &html,
            &ListingSchema::default(),
            &base(),
            CardErrorPolicy::Skip,
        )
        .unwrap();

        assert_eq!(kernels.len(), 1);
        assert_eq!(kernels[0].title, "Fine");
    }

    #[test]
    fn test_no_cards_yields_empty_list() {
        let html = "<html><body><p>nothing here</p></body></html>";
        let kernels = extract_kernels(
            html,
            &ListingSchema::default(),
            &base(),
            CardErrorPolicy::Abort,
        )
        .unwrap();
        assert!(kernels.is_empty());
    }
}
