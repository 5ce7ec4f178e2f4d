//! The five-stage curation pipeline.
//!
//! Control flow is strictly linear and single-pass: ingestion → curation →
//! extraction → synthesis → rendering, each stage's output handed to the
//! next by value. The pipeline is generic over the two model collaborators
//! so tests can run it end to end with stubs.
//!
//! Empty input at any point before synthesis ends the run early and
//! successfully, WITHOUT touching the previously published page, so a
//! transient upstream failure must never replace a good digest with a
//! blank one.

use crate::api::Complete;
use crate::config::DigestConfig;
use crate::{curate, extract, feeds, render, synthesize};
use chrono::NaiveDate;
use std::error::Error;
use tracing::{info, instrument};

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page was rendered and written.
    Published,
    /// No feed yielded a single headline; stopped before any model call.
    NoHeadlines,
    /// The curator returned an empty selection; stopped before extraction.
    NoSelection,
    /// Every selected URL failed extraction; stopped before synthesis.
    NoContent,
}

/// Run the whole pipeline once.
///
/// `curator` and `editor` are the two model collaborators (typically a
/// lighter and a stronger model). `date` feeds the page banner; it is a
/// parameter rather than an internal clock read so rendering stays
/// deterministic under test.
///
/// Synthesis-call and page-write failures propagate as errors; everything
/// upstream degrades per-item or short-circuits to an early success.
#[instrument(level = "info", skip_all)]
pub async fn run<C: Complete, E: Complete>(
    client: &reqwest::Client,
    config: &DigestConfig,
    curator: &C,
    editor: &E,
    date: NaiveDate,
) -> Result<RunOutcome, Box<dyn Error>> {
    info!("Fetching RSS feeds");
    let headlines = feeds::ingest_headlines(client, config).await;
    if headlines.is_empty() {
        info!("No headlines ingested; leaving previous page untouched");
        return Ok(RunOutcome::NoHeadlines);
    }

    info!("Filtering headlines against interest profile");
    let selection = curate::select_articles(curator, &headlines, config).await;
    if selection.is_empty() {
        info!("Curator selected nothing; leaving previous page untouched");
        return Ok(RunOutcome::NoSelection);
    }

    info!("Extracting full content");
    let articles = extract::extract_articles(client, &selection).await;
    if articles.is_empty() {
        info!("No article survived extraction; leaving previous page untouched");
        return Ok(RunOutcome::NoContent);
    }
    let source_blocks = extract::to_source_blocks(&articles);

    info!("Writing the digest");
    let digest = synthesize::write_digest(editor, &source_blocks).await?;

    info!("Rendering page");
    let page = render::render_page(&digest, date);
    render::publish(&config.output_path, &page).await?;

    Ok(RunOutcome::Published)
}
