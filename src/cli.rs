//! Command-line interface definitions.
//!
//! The pipeline itself takes no behavior flags; everything here is config
//! plumbing (where the YAML file lives, where the page goes, and the API
//! credential pulled from the environment).

use clap::Parser;

/// Command-line arguments for the daily digest generator.
///
/// # Examples
///
/// ```sh
/// # Run with the default config path
/// DIGEST_API_KEY=sk-... daily_digest
///
/// # Explicit config and output override
/// DIGEST_API_KEY=sk-... daily_digest -c ./config.yaml -o ./public/index.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Override the output path from the config file
    #[arg(short, long)]
    pub output: Option<String>,

    /// API key for the chat-completion endpoint; absence is fatal before
    /// any network activity occurs
    #[arg(long, env = "DIGEST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
