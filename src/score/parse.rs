//! Score pattern matching on raw revision pages

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for "no score found", rendered downstream as `-`
pub const NO_SCORE: f64 = 0.0;

static PUBLIC_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""publicScore":"(.+?)""#).expect("public score pattern"));

static BEST_PUBLIC_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""bestPublicScore":([^,]+)"#).expect("best public score pattern"));

/// Extracts the public leaderboard score embedded in a revision page
///
/// Searches for a `"publicScore":"<value>"` fragment and parses the value as
/// a float. Returns [`NO_SCORE`] when the fragment is absent or unparseable.
pub fn parse_public_score(html: &str) -> f64 {
    PUBLIC_SCORE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(NO_SCORE)
}

/// Extracts the whole-kernel best public score from a kernel page
///
/// Matches the sibling `"bestPublicScore":<value>` fragment. Not used by the
/// revision table (the listing's best-score label is reported instead), but
/// kept as an extraction capability alongside [`parse_public_score`].
pub fn parse_best_public_score(html: &str) -> f64 {
    BEST_PUBLIC_SCORE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(NO_SCORE)
}
