//! Score fetcher: leaderboard scores for individual kernel revisions
//!
//! Revision pages embed their public leaderboard score as inline JSON-like
//! data, so no browser session is needed here: a plain HTTP GET plus pattern
//! matching is enough.

mod fetch;
mod parse;

pub use fetch::{build_http_client, fetch_revision_scores, fetch_score, ScoreRecord};
pub use parse::{parse_best_public_score, parse_public_score, NO_SCORE};
