//! Browser lifecycle management
//!
//! The automation browser is an explicitly managed, process-wide shared
//! resource: launched lazily on first use behind a single-initialization
//! guard, reused by every export call, and torn down only through the
//! explicit shutdown hook. Each export call opens its own page, which is
//! the isolation unit between concurrent exports.

use crate::pdf::error::{PdfError, PdfResult};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

/// Launch configuration for the automation browser
#[derive(Debug, Clone, Default)]
pub struct BrowserLaunchConfig {
    /// Explicit browser executable; autodetected when absent
    pub executable: Option<PathBuf>,
    /// Pass --no-sandbox (required in most container environments)
    pub no_sandbox: bool,
    /// Extra command-line arguments
    pub extra_args: Vec<String>,
}

/// A launched browser plus its event handler task
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a headless browser with the given configuration
    pub async fn launch(config: &BrowserLaunchConfig) -> PdfResult<Self> {
        let mut builder = BrowserConfig::builder();
        if let Some(executable) = &config.executable {
            builder = builder.chrome_executable(executable);
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        builder = builder.args(config.extra_args.clone());

        let browser_config = builder.build().map_err(PdfError::Browser)?;
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // The handler stream must be driven for the connection to make
        // progress; it ends when the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh page for one export call
    pub async fn new_page(&self) -> PdfResult<Page> {
        Ok(self.browser.new_page("about:blank").await?)
    }

    /// Whether the browser still answers on the automation protocol
    pub async fn is_alive(&self) -> bool {
        self.browser.version().await.is_ok()
    }

    /// Close the browser and stop the handler task
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "browser did not close cleanly");
        }
        self.handler_task.abort();
    }
}

/// Lazily launched, shared browser handle
///
/// The only long-lived mutable shared resource in the subsystem. The
/// first caller launches the browser; concurrent first calls are
/// serialized by the init guard so only one browser process ever starts.
pub struct SharedBrowser {
    config: BrowserLaunchConfig,
    cell: OnceCell<BrowserSession>,
}

impl SharedBrowser {
    pub fn new(config: BrowserLaunchConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Get the shared session, launching the browser on first use
    pub async fn get(&self) -> PdfResult<&BrowserSession> {
        self.cell
            .get_or_try_init(|| BrowserSession::launch(&self.config))
            .await
    }

    /// Availability probe: can the browser be reached (or launched)
    pub async fn probe(&self) -> bool {
        match self.cell.get() {
            Some(session) => session.is_alive().await,
            None => self.get().await.is_ok(),
        }
    }

    /// Explicit shutdown; the browser is never torn down implicitly
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.cell.take() {
            session.shutdown().await;
        }
    }
}
