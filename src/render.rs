//! Document rendering: markdown digest in, static HTML page out.
//!
//! Rendering is fully deterministic: the same digest and the same date
//! produce byte-identical output. The page is self-contained apart from a
//! single stylesheet link and is written in full to the configured path,
//! replacing the previous run's page. A write failure here is fatal; there
//! is no partial-write recovery.

use chrono::NaiveDate;
use pulldown_cmark::{Event, Options, Parser, html};
use std::error::Error;
use tracing::{info, instrument};

/// Convert digest markdown to an HTML fragment.
///
/// Fenced code blocks render as `<pre><code>`; soft line breaks are mapped
/// to hard breaks so the digest's line structure survives into the page.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Render the full page: convert the digest and substitute it plus the date
/// banner into the fixed template.
pub fn render_page(digest_markdown: &str, date: NaiveDate) -> String {
    let content = markdown_to_html(digest_markdown);
    let date = date.format("%Y-%m-%d");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Daily Briefing - {date}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/water.css@2/out/water.css">
</head>
<body>
    <h1>📅 {date}</h1>
    <hr>
    <div>{content}</div>
</body>
</html>
"#
    )
}

/// Write the rendered page as UTF-8, fully overwriting any existing file.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn publish(path: &str, page: &str) -> Result<(), Box<dyn Error>> {
    tokio::fs::write(path, page).await?;
    info!(bytes = page.len(), "Wrote rendered page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    #[test]
    fn test_markdown_headings_and_links() {
        let html = markdown_to_html(
            "## Tech\n\nBig story.\n\n[Read full article](https://example.com/a)",
        );
        assert!(html.contains("<h2>Tech</h2>"));
        assert!(html.contains(r#"<a href="https://example.com/a">Read full article</a>"#));
    }

    #[test]
    fn test_fenced_code_blocks_render() {
        let html = markdown_to_html("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_soft_breaks_become_hard_breaks() {
        let html = markdown_to_html("line one\nline two");
        assert!(html.contains("<br"));
    }

    #[test]
    fn test_render_page_is_deterministic() {
        let a = render_page("## Briefing\n\nHello.", date());
        let b = render_page("## Briefing\n\nHello.", date());
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_page_has_banner_and_content() {
        let page = render_page("## Briefing", date());
        assert!(page.contains("<h1>📅 2026-08-31</h1>"));
        assert!(page.contains("<title>Daily Briefing - 2026-08-31</title>"));
        assert!(page.contains("<h2>Briefing</h2>"));
        assert!(page.contains("water.css"));
    }

    #[test]
    fn test_only_timestamp_differs_across_dates() {
        let a = render_page("Same digest.", date());
        let b = render_page("Same digest.", NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_ne!(a, b);
        assert_eq!(
            a.replace("2026-08-31", "DATE"),
            b.replace("2026-09-01", "DATE")
        );
    }

    #[tokio::test]
    async fn test_publish_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "old page").unwrap();

        publish(path.to_str().unwrap(), "new page").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new page");
    }

    #[tokio::test]
    async fn test_publish_fails_on_bad_path() {
        let result = publish("/nonexistent-dir/index.html", "page").await;
        assert!(result.is_err());
    }
}
