//! Binary entry point: load configuration, wire up the collaborators, and
//! run the pipeline once.
//!
//! Exit behavior:
//! - page written, or an intentional empty-input early stop: exit 0
//! - missing API key, synthesis failure, or write failure: non-zero exit

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use daily_digest::api::ChatClient;
use daily_digest::cli::Cli;
use daily_digest::config::DigestConfig;
use daily_digest::pipeline::{self, RunOutcome};

/// Applied to every feed and page fetch; the pipeline imposes no internal
/// timeouts beyond this.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_digest starting up");

    let args = Cli::parse();
    debug!(config = %args.config, output = ?args.output, "Parsed CLI arguments");

    // The credential check happens before any network activity.
    let Some(api_key) = args.api_key else {
        return Err("DIGEST_API_KEY is not set".into());
    };

    let mut config = DigestConfig::load(&args.config)?;
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("daily_digest/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let curator = ChatClient::new(
        client.clone(),
        &config.models.base_url,
        &api_key,
        &config.models.curator_model,
    );
    let editor = ChatClient::new(
        client.clone(),
        &config.models.base_url,
        &api_key,
        &config.models.editor_model,
    );

    let today = Local::now().date_naive();
    let outcome = pipeline::run(&client, &config, &curator, &editor, today).await?;

    let elapsed = start_time.elapsed();
    match outcome {
        RunOutcome::Published => {
            info!(path = %config.output_path, secs = elapsed.as_secs(), "Done! Page generated");
        }
        other => {
            info!(outcome = ?other, secs = elapsed.as_secs(), "Run ended early; nothing published");
        }
    }

    Ok(())
}
