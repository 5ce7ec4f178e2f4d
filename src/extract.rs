//! Content extraction: fetch each selected URL and recover readable body
//! text.
//!
//! URLs are processed in selection order, one at a time. Any failure
//! (transport error, error status, or a page that yields no usable text
//! because it is paywalled, script-rendered, or empty) drops that URL; no
//! partial or garbage text is ever forwarded. Surviving articles are
//! formatted as labeled `SOURCE URL:` blocks and joined into the single
//! string the synthesizer consumes.

use crate::models::ExtractedArticle;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Pages whose extracted text is shorter than this are treated as having no
/// usable main body and are skipped.
const MIN_BODY_CHARS: usize = 120;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main"]
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
});

/// Fetch and extract every selected URL, keeping only the survivors.
///
/// At most one [`ExtractedArticle`] per input URL, in input order. URLs the
/// curator hallucinated simply fail their fetch here and disappear like any
/// other failure.
#[instrument(level = "info", skip_all, fields(urls = urls.len()))]
pub async fn extract_articles(client: &reqwest::Client, urls: &[String]) -> Vec<ExtractedArticle> {
    let mut articles = Vec::new();

    for url in urls {
        // The curator may hand back URLs that never appeared in any feed;
        // a malformed one is skipped like any other failure.
        if let Err(e) = Url::parse(url) {
            warn!(%url, error = %e, "Selected URL is not a valid URL; skipping");
            continue;
        }
        match fetch_page(client, url).await {
            Ok(html) => match extract_body(&html) {
                Some(body) => {
                    debug!(%url, chars = body.chars().count(), "Extracted article body");
                    articles.push(ExtractedArticle {
                        source: url.clone(),
                        body,
                    });
                }
                None => {
                    warn!(%url, "No usable main-body text; skipping");
                }
            },
            Err(e) => {
                warn!(%url, error = %e, "Fetch failed; skipping");
            }
        }
    }

    info!(
        selected = urls.len(),
        extracted = articles.len(),
        "Content extraction complete"
    );
    articles
}

/// Join surviving articles into the one concatenated string handed to the
/// synthesizer. Individual article structure does not survive past this
/// boundary.
pub fn to_source_blocks(articles: &[ExtractedArticle]) -> String {
    articles
        .iter()
        .map(ExtractedArticle::to_block)
        .collect::<Vec<_>>()
        .join("\n")
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("page fetch returned status {status}").into());
    }
    Ok(response.text().await?)
}

/// Pull readable text out of a page, or `None` when there is nothing usable.
///
/// Prefers paragraphs inside an `<article>` container, then `<main>`, then
/// any paragraph in the document. Whitespace inside a paragraph is
/// collapsed; paragraphs are joined with blank lines.
fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let mut paragraphs: Vec<String> = Vec::new();
    for container in CONTAINERS.iter() {
        paragraphs = document
            .select(container)
            .flat_map(|c| c.select(&PARAGRAPH))
            .map(|p| collapse_whitespace(&p.text().collect::<Vec<_>>().join(" ")))
            .filter(|t| !t.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            break;
        }
    }
    if paragraphs.is_empty() {
        paragraphs = document
            .select(&PARAGRAPH)
            .map(|p| collapse_whitespace(&p.text().collect::<Vec<_>>().join(" ")))
            .filter(|t| !t.is_empty())
            .collect();
    }

    let body = paragraphs.join("\n\n");
    if body.chars().count() < MIN_BODY_CHARS {
        return None;
    }
    Some(body)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
