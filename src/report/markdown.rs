//! Markdown table, profile block and report construction

use crate::extract::KernelMetadata;
use crate::{Result, ScrapeError};
use chrono::Utc;
use std::path::Path;

/// Column header of every revision-score table
pub const TABLE_HEADER: [&str; 5] = ["Title", "Version", "Score", "Committed at", "Link"];

/// Renders a markdown link
pub fn make_link(text: &str, url: &str) -> String {
    format!("[{}]({})", text, url)
}

/// Renders one table row, cells joined by `|` and wrapped in `|`
pub fn make_row<S: AsRef<str>>(items: &[S]) -> String {
    let joined = items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("|");
    format!("|{}|", joined)
}

/// Renders a markdown table: header row, dash separator, one row per tuple
pub fn make_table<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(make_row(header));
    lines.push(make_row(&vec!["-"; header.len()]));
    for row in rows {
        lines.push(make_row(row));
    }
    lines.join("\n")
}

/// Renders the fixed-layout profile block for one kernel
///
/// Layout: a `<br>` spacer, a heading with the linked kernel title, the
/// author's avatar wrapped in their profile link, a bulleted metadata summary,
/// and the revision table beneath.
pub fn make_profile(kernel_link: &str, table: &str, meta: &KernelMetadata) -> String {
    let thumbnail = format!(
        r#"<img src="{}" alt="{}" width="72" height="72">"#,
        meta.avatar_url, meta.author_name
    );
    let thumbnail = format!(r#"<a href="{}">{}</a>"#, meta.author_url, thumbnail);
    let author_link = make_link(&meta.author_name, &meta.author_url);

    format!(
        "<br>\n\n\
         # {kernel_link}\n\n\
         {thumbnail}\n\n\
         - Author: {author_link}\n\
         - Best score: {best_score}\n\
         - Vote count: {vote_count}\n\
         - Comment count: {comment_count}\n\
         - Last updated: {last_updated}\n\n\
         {table}",
        kernel_link = kernel_link,
        thumbnail = thumbnail,
        author_link = author_link,
        best_score = meta.best_score,
        vote_count = meta.vote_count,
        comment_count = meta.comment_count,
        last_updated = meta.last_updated,
        table = table,
    )
}

/// A timestamp of the current UTC time, e.g. `2020/05/17 09:30:00 (UTC)`
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y/%m/%d %H:%M:%S (UTC)").to_string()
}

/// Joins the generation-timestamp header and all profile blocks into the
/// final report document
pub fn assemble_report(profiles: &[String]) -> String {
    let header = format!("### Created at {}", utc_timestamp());
    let mut parts = vec![header];
    parts.extend(profiles.iter().cloned());
    parts.join("\n\n")
}

/// Writes the report, overwriting any previous run's output
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| ScrapeError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metadata() -> KernelMetadata {
        KernelMetadata {
            author_name: "Alice".to_string(),
            author_url: "/alice".to_string(),
            avatar_url: "/alice.png".to_string(),
            vote_count: "42".to_string(),
            comment_count: "7 comments".to_string(),
            last_updated: "2 days ago".to_string(),
            best_score: "0.8134".to_string(),
        }
    }

    #[test]
    fn test_make_link() {
        assert_eq!(
            make_link("Open", "https://example.com/v1"),
            "[Open](https://example.com/v1)"
        );
    }

    #[test]
    fn test_make_row() {
        assert_eq!(make_row(&["a", "b", "c"]), "|a|b|c|");
    }

    #[test]
    fn test_make_table_shape() {
        let rows = vec![vec!["x".to_string(), "y".to_string()]];
        let table = make_table(&["A", "B"], &rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines, vec!["|A|B|", "|-|-|", "|x|y|"]);
    }

    #[test]
    fn test_make_table_empty_rows() {
        let rows: Vec<Vec<String>> = vec![];
        let table = make_table(&["A", "B", "C"], &rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines, vec!["|A|B|C|", "|-|-|-|"]);
    }

    #[test]
    fn test_make_profile_layout() {
        let profile = make_profile("[Titanic EDA](https://example.com/k)", "|A|\n|-|", &test_metadata());

        assert!(profile.starts_with("<br>\n\n# [Titanic EDA](https://example.com/k)"));
        assert!(profile.contains(r#"<a href="/alice"><img src="/alice.png" alt="Alice" width="72" height="72"></a>"#));
        assert!(profile.contains("- Author: [Alice](/alice)"));
        assert!(profile.contains("- Best score: 0.8134"));
        assert!(profile.contains("- Vote count: 42"));
        assert!(profile.contains("- Comment count: 7 comments"));
        assert!(profile.contains("- Last updated: 2 days ago"));
        assert!(profile.ends_with("|A|\n|-|"));
    }

    #[test]
    fn test_utc_timestamp_format() {
        let pattern = regex::Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2} \(UTC\)$").unwrap();
        assert!(pattern.is_match(&utc_timestamp()));
    }

    #[test]
    fn test_assemble_report_round_trip() {
        let profiles: Vec<String> = (1..=3)
            .map(|i| make_profile(&format!("[Kernel {}](url)", i), "|A|\n|-|", &test_metadata()))
            .collect();

        let report = assemble_report(&profiles);

        let headings = report.lines().filter(|l| l.starts_with("# ")).count();
        assert_eq!(headings, 3);
        assert!(report.starts_with("### Created at "));
        // Blocks are double-newline separated
        assert!(report.contains("\n\n<br>"));
    }

    #[test]
    fn test_assemble_report_no_profiles() {
        let report = assemble_report(&[]);
        assert!(report.starts_with("### Created at "));
        assert_eq!(report.lines().count(), 1);
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.md");

        write_report(&path, "first run").unwrap();
        write_report(&path, "second run").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second run");
    }

    #[test]
    fn test_write_report_bad_path() {
        let result = write_report(Path::new("/nonexistent/dir/result.md"), "content");
        assert!(matches!(result, Err(ScrapeError::Write { .. })));
    }
}
