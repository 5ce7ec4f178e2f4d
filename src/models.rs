//! Data models passed between pipeline stages.
//!
//! Each stage of the pipeline consumes the previous stage's output and owns
//! it outright; nothing here is shared or mutated across stage boundaries.
//!
//! - [`Headline`]: a flattened feed entry produced by ingestion
//! - [`ExtractedArticle`]: main-body text recovered from a selected URL

use serde::Serialize;

/// A single feed entry, flattened into the uniform shape the curator sees.
///
/// `link` is the join key for the rest of the pipeline: the curator selects
/// links, the extractor fetches them, and the synthesizer cites them.
/// Multiple feeds may yield the same link; no deduplication is performed.
#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    /// The entry title as published by the feed.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Feed-provided summary or description, truncated at ingestion time
    /// to keep the curation prompt bounded. Empty when the feed omits it.
    pub summary: String,
}

/// Main-body text extracted from one selected article URL.
///
/// A selected URL yields at most one of these; fetch or extraction failures
/// yield none. The `source` URL is embedded verbatim in the labeled block
/// handed to the synthesizer so it can be echoed back as a citation.
#[derive(Debug)]
pub struct ExtractedArticle {
    /// The URL the body was extracted from.
    pub source: String,
    /// Extracted readable text.
    pub body: String,
}

impl ExtractedArticle {
    /// Format this article as a labeled block for the synthesis prompt.
    ///
    /// The literal `SOURCE URL:` marker is load-bearing: the editorial
    /// instructions tell the model to cite exactly this value, so it must
    /// appear verbatim in the concatenated input text.
    pub fn to_block(&self) -> String {
        format!("SOURCE URL: {}\nCONTENT:\n{}\n---", self.source, self.body)
    }
}
