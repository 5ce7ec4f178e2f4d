//! Relevance curation: one model call plus the fallback that keeps the
//! pipeline alive when the model ignores its output directive.
//!
//! The model is instructed to answer with *only* a raw JSON array of URL
//! strings. Adherence is not guaranteed, so all response handling funnels
//! through [`parse_selection`], which strips stray code fences, parses
//! strictly, and on any failure substitutes the first-N links in ingestion
//! order. The stage never errors past its boundary; its output is always a
//! valid (possibly empty) sequence of URLs.

use crate::api::Complete;
use crate::config::DigestConfig;
use crate::models::Headline;
use crate::utils::truncate_for_log;
use tracing::{info, instrument, warn};

/// Build the curation prompt from the headline set and interest profile.
///
/// Headlines are serialized as a JSON array so titles containing quotes or
/// newlines cannot break the prompt structure. The selection size is an
/// advisory range spliced into the instruction text, not enforced anywhere.
pub fn curation_prompt(headlines: &[Headline], config: &DigestConfig) -> String {
    let listing = serde_json::to_string_pretty(headlines)
        .unwrap_or_else(|_| String::from("[]"));

    format!(
        "Here is a list of news headlines:\n{listing}\n\n\
         Based on these user interests: \"{interests}\"\n\n\
         Select the top {target} most relevant articles.\n\
         Return ONLY a raw JSON array of their URLs, nothing else.\n\
         Example: [\"url1\", \"url2\", \"url3\"]",
        interests = config.interests,
        target = config.selection_target,
    )
}

/// Remove markdown code fences the model may have wrapped its answer in.
///
/// Handles an opening fence with or without a language tag and a closing
/// fence, each on its own line or flush against the payload. Applying this
/// to unfenced text is a no-op, so the operation is idempotent.
fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the language tag (e.g. "json") up to the first newline.
        s = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Parse a curator response into a URL selection, falling back to the first
/// `fallback_count` headline links on any failure.
///
/// The strict parse rejects anything that is not a JSON array of strings:
/// prose, nested objects, numbers, or an empty response all take the
/// fallback path. A valid array passes through exactly as sent: no
/// reordering, no deduplication, and no check that the URLs were ever in
/// the headline set.
pub fn parse_selection(
    response: &str,
    headlines: &[Headline],
    fallback_count: usize,
) -> Vec<String> {
    let cleaned = strip_code_fences(response);
    match serde_json::from_str::<Vec<String>>(cleaned) {
        Ok(urls) => {
            info!(count = urls.len(), "Parsed model selection");
            urls
        }
        Err(e) => {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(response, 300),
                fallback_count,
                "Could not parse model selection; falling back to first links"
            );
            headlines
                .iter()
                .take(fallback_count)
                .map(|h| h.link.clone())
                .collect()
        }
    }
}

/// Run the curation stage: one model call, then [`parse_selection`].
///
/// A transport-level failure of the call itself is treated the same way as
/// an unparseable response; the deterministic fallback keeps the run
/// moving at the cost of selection quality.
#[instrument(level = "info", skip_all, fields(headlines = headlines.len()))]
pub async fn select_articles<C: Complete>(
    curator: &C,
    headlines: &[Headline],
    config: &DigestConfig,
) -> Vec<String> {
    let prompt = curation_prompt(headlines, config);

    match curator.complete(&prompt).await {
        Ok(response) => parse_selection(&response, headlines, config.fallback_count),
        Err(e) => {
            warn!(error = %e, "Curation call failed; falling back to first links");
            headlines
                .iter()
                .take(config.fallback_count)
                .map(|h| h.link.clone())
                .collect()
        }
    }
}
