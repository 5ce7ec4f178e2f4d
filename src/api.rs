//! Chat-completion client for the two model calls.
//!
//! The pipeline talks to any OpenAI-compatible `chat/completions` endpoint.
//! The [`Complete`] trait is the seam that keeps the pipeline testable:
//! production code goes through [`ChatClient`], tests substitute stubs and
//! never touch the network.
//!
//! Each call is a single best-effort attempt. Whether a failed call is fatal
//! is the caller's decision: curation falls back, synthesis aborts the run.

use crate::utils::truncate_for_log;
use serde_json::{Value, json};
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// A collaborator that can turn a prompt into a text completion.
///
/// Implemented by [`ChatClient`] for real runs and by in-memory stubs in
/// tests. The model id is fixed per instance, so the pipeline holds two
/// implementors: a lighter one for curation and a stronger one for
/// synthesis.
#[allow(async_fn_in_trait)]
pub trait Complete {
    /// Send a prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}

/// Client for one model on an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Create a client bound to one endpoint and model id.
    ///
    /// The `reqwest::Client` is shared with the rest of the pipeline so all
    /// network calls inherit the same timeout and TLS configuration.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Pull the first choice's message content out of a completion response.
    fn response_text(body: &Value) -> Option<String> {
        body.get("choices")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

impl Complete for ChatClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                %status,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                body_preview = %truncate_for_log(&body, 300),
                "Chat completion returned error status"
            );
            return Err(format!("chat completion failed with status {status}").into());
        }

        let body: Value = response.json().await?;
        let text = Self::response_text(&body)
            .ok_or_else(|| format!("chat completion response had no message content: {body}"))?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Chat completion succeeded"
        );
        Ok(text)
    }
}
