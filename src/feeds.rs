//! Feed ingestion: fetch each configured feed and flatten its entries.
//!
//! Feeds are processed strictly in configured order and one at a time. A
//! feed that cannot be fetched or parsed is logged and skipped in full; a
//! single bad source never aborts ingestion of the rest. Within a feed,
//! entries keep the feed-provided order (typically reverse-chronological)
//! and at most `per_feed_cap` of them are taken.

use crate::config::DigestConfig;
use crate::models::Headline;
use crate::utils::truncate_chars;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};

/// Fetch all configured feeds and flatten them into one headline sequence.
///
/// Per-source failures are swallowed after being reported; the returned
/// sequence contains only records from sources that fetched and parsed
/// cleanly. Duplicate links across feeds are kept as-is.
#[instrument(level = "info", skip_all, fields(feeds = config.feeds.len()))]
pub async fn ingest_headlines(client: &reqwest::Client, config: &DigestConfig) -> Vec<Headline> {
    let mut headlines = Vec::new();

    for feed_url in &config.feeds {
        match ingest_feed(client, feed_url, config.per_feed_cap, config.summary_max_chars).await {
            Ok(mut records) => {
                debug!(url = %feed_url, count = records.len(), "Ingested feed");
                headlines.append(&mut records);
            }
            Err(e) => {
                error!(url = %feed_url, error = %e, "Skipping feed");
            }
        }
    }

    info!(count = headlines.len(), "Feed ingestion complete");
    headlines
}

/// Fetch and flatten a single feed.
async fn ingest_feed(
    client: &reqwest::Client,
    feed_url: &str,
    per_feed_cap: usize,
    summary_max_chars: usize,
) -> Result<Vec<Headline>, Box<dyn Error>> {
    let response = client.get(feed_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("feed fetch returned status {status}").into());
    }

    let content = response.bytes().await?;
    let feed = feed_rs::parser::parse(content.as_ref())?;

    let mut records = Vec::new();
    for entry in feed.entries.into_iter().take(per_feed_cap) {
        let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
            warn!(url = %feed_url, id = %entry.id, "Entry has no link; skipping");
            continue;
        };
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let summary = entry
            .summary
            .map(|s| truncate_chars(&s.content, summary_max_chars))
            .unwrap_or_default();

        records.push(Headline {
            title,
            link,
            summary,
        });
    }

    Ok(records)
}
