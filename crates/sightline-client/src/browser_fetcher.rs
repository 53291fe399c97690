use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use sightline_core::error::AppError;
use sightline_core::traits::Fetcher;
use tokio::task::JoinHandle;

use crate::config::BrowserSettings;

/// Starts a browser instance on demand.
///
/// This is the seam tests use to stub out Chromium: the fetcher never
/// touches a binary or the network directly.
pub trait BrowserLauncher: Send + Sync + Clone {
    type Session: BrowserSession;

    fn launch(&self) -> impl Future<Output = Result<Self::Session, AppError>> + Send;
}

/// A running browser owned by exactly one fetch.
pub trait BrowserSession: Send {
    /// Navigate to `url`, wait for the load event, and return the serialized DOM.
    fn render(&mut self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Shut the browser down and reap its process.
    fn close(self) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Headless-browser fetcher using Chromium via the Chrome DevTools Protocol.
///
/// Renders JavaScript before returning the HTML, so client-rendered pages
/// are captured the way a user would see them.
///
/// Every [`Fetcher::fetch`] call launches its own browser and closes it
/// before returning, whether rendering succeeded or not. Failures are
/// logged and reported as [`AppError::Fetch`].
///
/// # Example
///
/// ```rust,no_run
/// use sightline_client::{BrowserSettings, ChromiumFetcher};
/// use sightline_core::traits::Fetcher;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = ChromiumFetcher::chromium(BrowserSettings::default());
/// let html = fetcher.fetch("https://example.com").await?;
/// println!("{}", &html[..200]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ChromiumFetcher<L = ChromiumLauncher>
where
    L: BrowserLauncher,
{
    launcher: L,
    timeout: Duration,
}

impl ChromiumFetcher<ChromiumLauncher> {
    /// Fetcher backed by a real headless Chromium.
    pub fn chromium(settings: BrowserSettings) -> Self {
        let timeout = settings.timeout;
        Self::new(ChromiumLauncher::new(settings), timeout)
    }
}

impl<L> ChromiumFetcher<L>
where
    L: BrowserLauncher,
{
    pub fn new(launcher: L, timeout: Duration) -> Self {
        Self { launcher, timeout }
    }

    async fn render_once(&self, url: &str) -> Result<String, AppError> {
        let mut session = self.launcher.launch().await?;

        let rendered = tokio::time::timeout(self.timeout, session.render(url)).await;

        // Always tear the browser down, even if rendering failed or timed out.
        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser cleanly: {e}");
        }

        let html = match rendered {
            Ok(inner) => inner?,
            Err(_) => {
                return Err(AppError::Fetch(format!(
                    "Rendering {url} timed out after {} seconds",
                    self.timeout.as_secs()
                )));
            }
        };

        if html.trim().is_empty() {
            return Err(AppError::Fetch(format!("{url} rendered no content")));
        }

        Ok(html)
    }
}

impl<L> Fetcher for ChromiumFetcher<L>
where
    L: BrowserLauncher,
{
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.render_once(url).await.map_err(|e| {
            tracing::warn!("Error fetching HTML content for {url}: {e}");
            e.into_fetch_error()
        })
    }
}

// ---------------------------------------------------------------------------
// Chromium
// ---------------------------------------------------------------------------

/// Launches a fresh headless Chromium process per call.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    chrome_bin: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            chrome_bin: settings.chrome_bin,
        }
    }

    /// Tries to locate the real Chrome/Chromium binary.
    ///
    /// On systems where Chromium is installed via **snap**, the wrapper at
    /// `/snap/bin/chromium` strips unknown CLI flags, breaking headless mode.
    /// We look for the real binary inside the snap first, then fall back to
    /// well-known system paths. If nothing is found we return `None` and let
    /// `chromiumoxide` do its own lookup.
    fn find_chrome_binary(&self) -> Option<PathBuf> {
        if let Some(path) = &self.chrome_bin {
            if path.exists() {
                return Some(path.clone());
            }
            tracing::warn!("Configured Chrome binary {} does not exist", path.display());
        }

        const CANDIDATES: &[&str] = &[
            "/snap/chromium/current/usr/lib/chromium-browser/chrome",
            "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
        ];

        CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn browser_config(&self) -> Result<BrowserConfig, AppError> {
        let mut builder = BrowserConfig::builder().no_sandbox().disable_default_args();

        if let Some(bin) = self.find_chrome_binary() {
            tracing::debug!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--no-first-run")
            .build()
            .map_err(|e| AppError::Fetch(format!("Browser config error: {e}")))
    }
}

impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, AppError> {
        let config = self.browser_config()?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::debug!("Browser CDP handler stopped: {event:?}");
                    break;
                }
            }
        });

        Ok(ChromiumSession { browser, handler })
    }
}

/// One Chromium process plus the task driving its CDP connection.
///
/// Dropping the session without calling [`BrowserSession::close`] still
/// kills the process; `chromiumoxide` does that on drop.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession for ChromiumSession {
    async fn render(&mut self, url: &str) -> Result<String, AppError> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to navigate to {url}: {e}")))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| AppError::Fetch(format!("Page did not finish loading: {e}")))?;

        page.content()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read page content: {e}")))
    }

    async fn close(mut self) -> Result<(), AppError> {
        let closed = self.browser.close().await;
        match Teardown::after(&closed) {
            Teardown::Reap => {
                let _ = self.browser.wait().await;
            }
            Teardown::Kill => {
                tracing::warn!("Browser did not close cleanly, killing the process");
                let _ = self.browser.kill().await;
            }
        }
        self.handler.abort();

        closed
            .map(|_| ())
            .map_err(|e| AppError::Fetch(format!("Failed to close browser: {e}")))
    }
}

/// How to finish off the Chromium process once `close` has been sent.
#[derive(Debug, PartialEq, Eq)]
enum Teardown {
    /// The browser acknowledged the close; wait for it to exit.
    Reap,
    /// The close command failed. Waiting could block forever on a hung
    /// browser, so the process is killed instead.
    Kill,
}

impl Teardown {
    fn after<T, E>(closed: &Result<T, E>) -> Self {
        if closed.is_ok() { Teardown::Reap } else { Teardown::Kill }
    }
}
