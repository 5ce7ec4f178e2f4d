//! Digest synthesis: one editorial model call over the concatenated source
//! blocks.
//!
//! Unlike curation there is no fallback here: a failed call is fatal for
//! the run, and the response markdown is passed through verbatim with no
//! post-processing or structural validation. From the pipeline's point of
//! view the digest is untyped text; the topic sections and citation links
//! are requested by instruction only.

use crate::api::Complete;
use std::error::Error;
use tracing::{info, instrument};

/// Build the synthesis prompt around the concatenated `SOURCE URL:` blocks.
pub fn synthesis_prompt(source_blocks: &str) -> String {
    format!(
        "You are a professional news editor.\n\
         Here is the full text of several articles:\n\n\
         {source_blocks}\n\n\
         Task:\n\
         1. Categorize these articles by topic (e.g., Tech, Politics, Science).\n\
         2. Write a comprehensive \"Morning Briefing\" article.\n\
         3. For each story, provide a detailed summary (readable in 2 minutes).\n\
         4. MUST include the \"SOURCE URL\" provided in the text as a clickable \
         link [Read full article](url) at the end of each section.\n\
         5. Use Markdown formatting."
    )
}

/// Run the synthesis stage and return the digest markdown.
///
/// The returned string is the model response verbatim. Errors propagate to
/// the caller and abort the run.
#[instrument(level = "info", skip_all, fields(input_chars = source_blocks.chars().count()))]
pub async fn write_digest<C: Complete>(
    editor: &C,
    source_blocks: &str,
) -> Result<String, Box<dyn Error>> {
    let digest = editor.complete(&synthesis_prompt(source_blocks)).await?;
    info!(digest_chars = digest.chars().count(), "Digest synthesized");
    Ok(digest)
}
