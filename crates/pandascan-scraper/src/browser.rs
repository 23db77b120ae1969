//! Headless Chromium wrapper.
//!
//! Owns the browser process and the CDP handler task that drives its
//! connection. One instance backs exactly one scrape, so cookies and
//! storage never leak between requests, and teardown is a plain
//! process kill rather than per-context bookkeeping.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::ScrapeError;

pub struct HeadlessBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl HeadlessBrowser {
    /// Launches a headless Chromium process with the given user agent and
    /// spawns the handler task that polls its CDP connection.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Extraction`] if the launch configuration is
    /// invalid or the browser process cannot be started (e.g. no Chromium
    /// installed).
    pub async fn launch(user_agent: &str) -> Result<Self, ScrapeError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--lang=en-US")
            .arg(format!("--user-agent={user_agent}"))
            .window_size(1366, 768)
            .build()
            .map_err(|e| ScrapeError::Extraction {
                reason: format!("browser config: {e}"),
            })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ScrapeError::Extraction {
                reason: format!("browser launch failed: {e}"),
            }
        })?;

        // The handler drives the CDP websocket and must be polled for the
        // browser's whole lifetime. Chrome versions newer than the protocol
        // definitions emit messages chromiumoxide cannot deserialize; those
        // are noise, not failures, so only connection-level errors stop the
        // loop.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let Err(e) = event else { continue };
                let message = e.to_string();
                if message.contains("data did not match any variant of untagged enum Message") {
                    continue;
                }
                tracing::debug!(error = %message, "CDP message error");
                if message.contains("connection closed")
                    || message.contains("websocket closed")
                    || message.contains("io error")
                {
                    tracing::debug!("CDP connection lost, stopping handler");
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Opens a fresh blank page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Extraction`] if the browser refuses to create
    /// a new target.
    pub async fn new_page(&self) -> Result<Page, ScrapeError> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Extraction {
                reason: format!("failed to open page: {e}"),
            })
    }

    /// Closes the browser process and aborts the handler task.
    ///
    /// Close errors are logged and swallowed: teardown runs on every exit
    /// path, including after a lost deadline race, and must not mask the
    /// scrape's own outcome.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser process wait failed");
        }
        self.handler_task.abort();
    }
}
