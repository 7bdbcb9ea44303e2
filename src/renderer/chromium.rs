//! Chromium-backed [`SearchPage`] using chromiumoxide.

use super::{PageError, SearchPage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interval between element-existence probes while waiting on a selector.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. NVDWEEK_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("NVDWEEK_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
        warn!(
            "NVDWEEK_CHROMIUM_PATH points to a non-existent file: {}",
            path.display()
        );
    }

    // 2. System PATH
    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common install locations
    let candidates: Vec<PathBuf> = if cfg!(target_os = "macos") {
        let mut paths = vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join("Applications/Google Chrome.app/Contents/MacOS/Google Chrome"));
        }
        paths
    } else {
        vec![
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/usr/bin/chromium"),
            PathBuf::from("/usr/bin/chromium-browser"),
            PathBuf::from("/snap/bin/chromium"),
            PathBuf::from("/opt/google/chrome/chrome"),
        ]
    };
    candidates.into_iter().find(|c| c.exists())
}

/// A live headless-Chromium session owning one page.
///
/// The CDP event handler runs on its own task for the lifetime of the
/// session and is aborted during [`SearchPage::close`].
pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumPage {
    /// Launch headless Chromium and open a blank page.
    pub async fn launch() -> Result<Self> {
        let chrome = find_chromium()
            .context("Chromium not found. Install Chrome/Chromium or set NVDWEEK_CHROMIUM_PATH.")?;
        debug!("launching Chromium at {}", chrome.display());

        let config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open a new page")?;

        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

#[async_trait]
impl SearchPage for ChromiumPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        let attempt = tokio::time::timeout(timeout, async {
            self.page.goto(url).await.context("navigation failed")?;
            // `goto` resolves once the frame's DOM is parsed; the follow-up
            // wait covers redirects without requiring network idle, and the
            // outer deadline bounds both.
            let _ = self.page.wait_for_navigation().await;
            anyhow::Ok(())
        })
        .await;

        match attempt {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PageError::Browser(e)),
            Err(_) => Err(PageError::Timeout(timeout)),
        }
    }

    async fn click(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        let started = Instant::now();
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => {
                    element.click().await.map_err(|e| {
                        PageError::Browser(anyhow::anyhow!("click on {selector} failed: {e}"))
                    })?;
                    return Ok(());
                }
                Err(_) if started.elapsed() < timeout => tokio::time::sleep(POLL_INTERVAL).await,
                Err(_) => return Err(PageError::Timeout(timeout)),
            }
        }
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        let started = Instant::now();
        loop {
            match self.page.find_element(selector).await {
                Ok(_) => {
                    debug!(
                        "selector {selector} appeared after {:.2}s",
                        started.elapsed().as_secs_f64()
                    );
                    return Ok(());
                }
                Err(_) if started.elapsed() < timeout => tokio::time::sleep(POLL_INTERVAL).await,
                Err(_) => return Err(PageError::Timeout(timeout)),
            }
        }
    }

    async fn content(&self) -> Result<String, PageError> {
        self.page.content().await.map_err(|e| {
            PageError::Browser(anyhow::anyhow!("failed to serialize page markup: {e}"))
        })
    }

    async fn settle(&self, delay: Duration) -> Result<(), PageError> {
        tokio::time::sleep(delay).await;
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), PageError> {
        let ChromiumPage {
            mut browser,
            page,
            handler,
        } = *self;

        if let Err(e) = page.close().await {
            debug!("page close reported: {e}");
        }
        if let Err(e) = browser.close().await {
            warn!("failed to close browser: {e}");
        }
        // Wait for the process to exit so no orphaned Chromium lingers.
        if let Err(e) = browser.wait().await {
            warn!("failed to wait for browser exit: {e}");
        }
        handler.abort();
        Ok(())
    }
}
