//! Run configuration loaded once at startup.
//!
//! All knobs for a run live in a single YAML file deserialized into
//! [`DigestConfig`]. The struct is constructed before any network activity
//! and passed into the pipeline entry point by reference; nothing reads
//! configuration ambiently after startup.
//!
//! The API credential is deliberately NOT part of the YAML file; it is
//! read from the process environment (see `cli.rs`) so the config file can
//! be committed without leaking secrets.

use serde::Deserialize;
use std::error::Error;
use tracing::{info, instrument};

/// Default char bound applied to feed-provided summaries.
const DEFAULT_SUMMARY_MAX_CHARS: usize = 500;
/// Default number of entries taken from each feed.
const DEFAULT_PER_FEED_CAP: usize = 10;
/// Default size of the deterministic fallback selection.
const DEFAULT_FALLBACK_COUNT: usize = 5;

fn default_summary_max_chars() -> usize {
    DEFAULT_SUMMARY_MAX_CHARS
}

fn default_per_feed_cap() -> usize {
    DEFAULT_PER_FEED_CAP
}

fn default_fallback_count() -> usize {
    DEFAULT_FALLBACK_COUNT
}

fn default_selection_target() -> String {
    "5 to 7".to_string()
}

fn default_output_path() -> String {
    "index.html".to_string()
}

/// Model endpoint configuration for the two chat-completion calls.
///
/// The curator call is cheap and high-volume (headlines only), so it can
/// run on a lighter model than the synthesis call, which has to write the
/// whole briefing.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible API, without the `/chat/completions`
    /// suffix (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model id used for relevance filtering.
    pub curator_model: String,
    /// Model id used for digest synthesis.
    pub editor_model: String,
}

/// Process-wide configuration for one digest run.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    /// Ordered list of RSS/Atom feed URLs. Feed order is preserved in the
    /// headline sequence and in fallback selection.
    pub feeds: Vec<String>,
    /// Free-form natural-language description of desired and excluded
    /// topics, passed verbatim to the curator prompt.
    pub interests: String,
    /// Chat model endpoints and ids.
    pub models: ModelConfig,
    /// Most-recent entries taken per feed.
    #[serde(default = "default_per_feed_cap")]
    pub per_feed_cap: usize,
    /// Char bound applied to each entry summary at ingestion time.
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
    /// Number of links taken, in ingestion order, when the curator response
    /// cannot be parsed.
    #[serde(default = "default_fallback_count")]
    pub fallback_count: usize,
    /// Advisory selection size spliced into the curator prompt
    /// (e.g. "5 to 7"). Instruction-level only, never enforced.
    #[serde(default = "default_selection_target")]
    pub selection_target: String,
    /// Path the rendered HTML page is written to, overwriting any previous
    /// run's output.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl DigestConfig {
    /// Load and deserialize a YAML config file.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: DigestConfig = serde_yaml::from_str(&raw)?;
        info!(
            feeds = config.feeds.len(),
            curator_model = %config.models.curator_model,
            editor_model = %config.models.editor_model,
            output = %config.output_path,
            "Loaded configuration"
        );
        Ok(config)
    }
}
