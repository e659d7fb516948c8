//! HTTP fetching of revision scores
//!
//! Each revision's score is fetched with a plain GET. Fetches for one kernel
//! run concurrently under a configurable bound, and results are joined back in
//! the original revision order before table construction.
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 5xx | Retry up to the configured attempts, 500ms delay |
//! | Timeout | Retry up to the configured attempts, 500ms delay |
//! | Other non-2xx | Immediate error |
//! | Connection error | Immediate error |

use crate::extract::RevisionDescriptor;
use crate::score::parse::{parse_public_score, NO_SCORE};
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinSet;

const RETRY_DELAY: Duration = Duration::from_millis(500);
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the HTTP client used for revision-page fetches
///
/// Request and connect timeouts bound how long a hung server can stall a
/// fetch; a timed-out request surfaces as a retryable error in
/// [`fetch_score`].
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// One revision's score, ready to become a table row
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    /// Kernel title the revision belongs to
    pub title: String,

    /// Version label as displayed
    pub version: String,

    /// Public score, [`NO_SCORE`] when the revision carries none
    pub score: f64,

    /// Commit timestamp label as displayed
    pub committed_at: String,

    /// Absolute URL of the revision snapshot
    pub url: String,
}

impl ScoreRecord {
    /// The score as it appears in the report table (`-` for no score)
    pub fn score_cell(&self) -> String {
        if self.score == NO_SCORE {
            "-".to_string()
        } else {
            self.score.to_string()
        }
    }
}

/// Fetches one revision page and extracts its public score
///
/// Transient failures (timeouts, 5xx) are retried up to `attempts` times with
/// a short delay; anything else fails immediately.
pub async fn fetch_score(client: &Client, url: &str, attempts: u32) -> Result<f64> {
    let mut attempt = 1;
    loop {
        let retryable = attempt < attempts;
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    let body = response.text().await.map_err(|e| ScrapeError::Http {
                        url: url.to_string(),
                        source: e,
                    })?;
                    return Ok(parse_public_score(&body));
                }

                if status.is_server_error() && retryable {
                    tracing::debug!(
                        "Got {} for {}, retrying (attempt {}/{})",
                        status,
                        url,
                        attempt,
                        attempts
                    );
                } else {
                    return Err(ScrapeError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
            }
            Err(e) if e.is_timeout() && retryable => {
                tracing::debug!("Timeout for {}, retrying (attempt {}/{})", url, attempt, attempts);
            }
            Err(e) => {
                return Err(ScrapeError::Http {
                    url: url.to_string(),
                    source: e,
                });
            }
        }

        attempt += 1;
        tokio::time::sleep(RETRY_DELAY).await;
    }
}

/// Fetches scores for all revisions of one kernel
///
/// At most `limit` fetches are in flight at a time; results come back in the
/// original revision order regardless of completion order. The first fetch
/// failure aborts the remaining in-flight fetches and is returned.
pub async fn fetch_revision_scores(
    client: &Client,
    title: &str,
    revisions: Vec<RevisionDescriptor>,
    limit: usize,
    attempts: u32,
) -> Result<Vec<ScoreRecord>> {
    let total = revisions.len();
    let mut scores: Vec<f64> = vec![NO_SCORE; total];
    let mut set: JoinSet<(usize, Result<f64>)> = JoinSet::new();
    let mut next = 0;
    let mut first_error: Option<ScrapeError> = None;

    while next < total || !set.is_empty() {
        // Keep the window full while work remains and nothing has failed
        while first_error.is_none() && next < total && set.len() < limit {
            let client = client.clone();
            let url = revisions[next].url.clone();
            let index = next;
            set.spawn(async move { (index, fetch_score(&client, &url, attempts).await) });
            next += 1;
        }

        let Some(joined) = set.join_next().await else {
            break;
        };

        match joined {
            Ok((index, Ok(score))) => scores[index] = score,
            Ok((_, Err(e))) => {
                if first_error.is_none() {
                    first_error = Some(e);
                    set.abort_all();
                }
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e.into());
                }
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let records = revisions
        .into_iter()
        .zip(scores)
        .map(|(revision, score)| ScoreRecord {
            title: title.to_string(),
            version: revision.label,
            score,
            committed_at: revision.committed_at,
            url: revision.url,
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn revision(label: &str, url: &str) -> RevisionDescriptor {
        RevisionDescriptor {
            label: label.to_string(),
            committed_at: "1 day ago".to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_score_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"publicScore":"0.8134"}"#),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let score = fetch_score(&client, &format!("{}/v1", server.uri()), 3)
            .await
            .unwrap();
        assert_eq!(score, 0.8134);
    }

    #[tokio::test]
    async fn test_fetch_score_no_pattern_is_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let score = fetch_score(&client, &format!("{}/v1", server.uri()), 3)
            .await
            .unwrap();
        assert_eq!(score, NO_SCORE);
    }

    #[tokio::test]
    async fn test_fetch_score_404_fails_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let result = fetch_score(&client, &format!("{}/gone", server.uri()), 3).await;
        assert!(matches!(
            result,
            Err(ScrapeError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_score_retries_server_errors() {
        let server = MockServer::start().await;
        // First two attempts hit a 500; then the fallback 200 mock answers.
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"publicScore":"0.5"}"#),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let score = fetch_score(&client, &format!("{}/flaky", server.uri()), 3)
            .await
            .unwrap();
        assert_eq!(score, 0.5);
    }

    #[tokio::test]
    async fn test_fetch_score_retries_timeouts() {
        let server = MockServer::start().await;
        // First attempt stalls past the client timeout; the fallback answers
        // fast.
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"publicScore":"0.6"}"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"publicScore":"0.6"}"#),
            )
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let score = fetch_score(&client, &format!("{}/slow", server.uri()), 3)
            .await
            .unwrap();
        assert_eq!(score, 0.6);
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_revision_scores_preserves_order() {
        let server = MockServer::start().await;
        for (route, score, delay_ms) in [("/v3", "0.3", 50u64), ("/v2", "0.2", 0), ("/v1", "0.1", 20)] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string(format!(r#"{{"publicScore":"{}"}}"#, score))
                        .set_delay(Duration::from_millis(delay_ms)),
                )
                .mount(&server)
                .await;
        }

        let revisions = vec![
            revision("Version 3", &format!("{}/v3", server.uri())),
            revision("Version 2", &format!("{}/v2", server.uri())),
            revision("Version 1", &format!("{}/v1", server.uri())),
        ];

        let client = Client::new();
        let records = fetch_revision_scores(&client, "Titanic EDA", revisions, 2, 3)
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].version, "Version 3");
        assert_eq!(records[0].score, 0.3);
        assert_eq!(records[1].version, "Version 2");
        assert_eq!(records[1].score, 0.2);
        assert_eq!(records[2].version, "Version 1");
        assert_eq!(records[2].score, 0.1);
        assert_eq!(records[0].title, "Titanic EDA");
    }

    #[tokio::test]
    async fn test_fetch_revision_scores_propagates_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"publicScore":"0.9"}"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let revisions = vec![
            revision("Version 2", &format!("{}/ok", server.uri())),
            revision("Version 1", &format!("{}/bad", server.uri())),
        ];

        let client = Client::new();
        let result = fetch_revision_scores(&client, "Broken", revisions, 2, 1).await;
        assert!(matches!(
            result,
            Err(ScrapeError::HttpStatus { status: 403, .. })
        ));
    }

    #[test]
    fn test_score_cell_rendering() {
        let mut record = ScoreRecord {
            title: "t".to_string(),
            version: "v".to_string(),
            score: 0.8134,
            committed_at: "now".to_string(),
            url: "u".to_string(),
        };
        assert_eq!(record.score_cell(), "0.8134");

        record.score = NO_SCORE;
        assert_eq!(record.score_cell(), "-");
    }
}
