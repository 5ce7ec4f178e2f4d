//! # Daily Digest
//!
//! A personalized news briefing generator built as a five-stage pipeline:
//!
//! 1. **Ingestion** ([`feeds`]): fetch the configured RSS/Atom feeds and
//!    flatten their entries into uniform headline records
//! 2. **Curation** ([`curate`]): ask a language model which headlines match
//!    the interest profile, with a deterministic fallback when its answer
//!    cannot be parsed
//! 3. **Extraction** ([`extract`]): fetch each selected article and recover
//!    its readable body text, skipping failures
//! 4. **Synthesis** ([`synthesize`]): ask a second language model to write
//!    one categorized briefing in markdown
//! 5. **Rendering** ([`render`]): convert the markdown to HTML and publish
//!    it as a static page
//!
//! Stages run sequentially and hand their output forward by value; see
//! [`pipeline::run`] for the orchestration and the early-exit rules that
//! keep a transient failure from publishing an empty digest.

pub mod api;
pub mod cli;
pub mod config;
pub mod curate;
pub mod extract;
pub mod feeds;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod synthesize;
pub mod utils;
