/// Smoke-test for `ChromiumFetcher` and `ScraperTextExtractor`.
///
/// Launches a headless Chromium, renders <https://example.com>, and checks
/// the extracted text contains the page heading.
///
/// Run with:
///   cargo run -p sightline-client --example render_smoke
use sightline_client::{BrowserSettings, ChromiumFetcher, ScraperTextExtractor};
use sightline_core::traits::{Fetcher, TextExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let fetcher = ChromiumFetcher::chromium(BrowserSettings::from_env()?);

    let url = "https://example.com";
    println!("Rendering {url} …");
    let html = fetcher.fetch(url).await?;

    let text = ScraperTextExtractor::new().extract(&html)?;
    assert!(
        text.body.contains("Example Domain"),
        "Expected heading not found in extracted body text"
    );

    println!("OK: {} bytes of HTML", html.len());
    println!("{}", text.user_message());
    Ok(())
}
