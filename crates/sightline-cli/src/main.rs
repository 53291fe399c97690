use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sightline_client::config::validate_base_url;
use sightline_client::{BrowserSettings, ChromiumFetcher, LlmConfig, OpenAiClient, ScraperTextExtractor};
use sightline_core::traits::{Fetcher, LlmClient, TextExtractor};
use sightline_core::{AltTextService, SummaryService};

#[derive(Parser)]
#[command(name = "sightline", version, about = "Alt text and page summaries for visually impaired users")]
struct Cli {
    #[command(flatten)]
    llm: LlmArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the LLM provider; unset flags fall back to the environment.
#[derive(Args)]
struct LlmArgs {
    /// LLM model to use (e.g., "gpt-4o-mini")
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// API key (reads from OPENAI_API_KEY env var if not provided)
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Korean alt text for an image
    AltText {
        /// Publicly reachable image URL
        #[arg(short, long)]
        image_url: String,
    },

    /// Render a web page in headless Chromium and summarize it
    Summarize {
        /// Page URL
        #[arg(short, long)]
        url: String,

        /// Chrome/Chromium binary to launch
        #[arg(long)]
        chrome_bin: Option<PathBuf>,

        /// Seconds to wait for the page to render
        #[arg(long)]
        browser_timeout: Option<u64>,
    },
}

impl LlmArgs {
    fn into_config(self) -> Result<LlmConfig> {
        let mut config = LlmConfig::from_env().context("Invalid LLM configuration")?;
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(base_url) = self.base_url {
            validate_base_url("--base-url", &base_url)?;
            config.base_url = base_url;
        }
        if self.api_key.is_some() {
            config.api_key = self.api_key;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sightline_core=info,sightline_client=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let llm_config = cli.llm.into_config()?;
    tracing::debug!(model = %llm_config.model, base_url = %llm_config.base_url, "Using LLM provider");
    let llm = OpenAiClient::new(&llm_config)?;

    let output = match cli.command {
        Commands::AltText { image_url } => cmd_alt_text(llm, &image_url).await?,
        Commands::Summarize {
            url,
            chrome_bin,
            browser_timeout,
        } => {
            let mut settings = BrowserSettings::from_env().context("Invalid browser configuration")?;
            if chrome_bin.is_some() {
                settings.chrome_bin = chrome_bin;
            }
            if let Some(secs) = browser_timeout {
                settings.timeout = Duration::from_secs(secs.max(1));
            }
            cmd_summarize(
                ChromiumFetcher::chromium(settings),
                ScraperTextExtractor::new(),
                llm,
                &url,
            )
            .await?
        }
    };

    println!("{output}");
    Ok(())
}

async fn cmd_alt_text<L: LlmClient>(llm: L, image_url: &str) -> Result<String> {
    AltTextService::new(llm)
        .generate(image_url)
        .await
        .with_context(|| format!("Failed to generate alt text for {image_url}"))
}

async fn cmd_summarize<F, C, L>(fetcher: F, extractor: C, llm: L, url: &str) -> Result<String>
where
    F: Fetcher,
    C: TextExtractor,
    L: LlmClient,
{
    SummaryService::new(fetcher, extractor, llm)
        .summarize(url)
        .await
        .with_context(|| format!("Failed to summarize {url}"))
}
