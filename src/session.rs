use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::SetLifecycleEventsEnabledParams;
use chromiumoxide::Page;
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{CaptureError, Result};
use crate::executable::Executable;

/// Options for starting the browser process
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Timeout for individual DevTools requests
    pub request_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            request_timeout: crate::config::DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

/// A headless browser with a single page, owned by the capture run
pub struct CaptureSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl CaptureSession {
    /// The page all captures run on
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser and wait for the process to exit.
    ///
    /// Failures are logged rather than returned; there is nothing left to do
    /// with a browser that will not close.
    pub async fn close(mut self) {
        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        match self.browser.wait().await {
            Ok(status) => debug!("Browser exited: {:?}", status),
            Err(e) => warn!("Failed waiting for browser exit: {}", e),
        }
        self.handler.abort();
        info!("Browser session closed");
    }
}

fn browser_config(executable: &Executable, options: &LaunchOptions) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .arg("--hide-scrollbars")
        .request_timeout(options.request_timeout);

    if let Executable::Path(path) = executable {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(CaptureError::BrowserLaunch)
}

/// Start a headless browser and open one blank page
pub async fn launch_session(
    executable: &Executable,
    options: &LaunchOptions,
) -> Result<CaptureSession> {
    let config = browser_config(executable, options)?;

    info!("Launching headless browser");
    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| CaptureError::BrowserLaunch(e.to_string()))?;

    let handler = tokio::spawn(async move {
        drive_handler(&mut handler).await;
    });

    let page = match open_page(&browser).await {
        Ok(page) => page,
        Err(e) => {
            // The process is already running; don't leave it behind
            if let Err(close_err) = browser.close().await {
                warn!("Browser close after failed setup failed: {}", close_err);
            }
            if let Err(wait_err) = browser.wait().await {
                warn!("Failed waiting for browser exit after failed setup: {}", wait_err);
            }
            handler.abort();
            return Err(e);
        }
    };

    info!("Headless browser ready");
    Ok(CaptureSession {
        browser,
        page,
        handler,
    })
}

/// Poll the CDP handler until the connection closes.
///
/// A single undecodable websocket message surfaces as one `Err` item while the
/// connection stays usable, so errors are logged and polling continues. Only
/// the end of the stream stops the loop. Returns the number of items polled.
pub(crate) async fn drive_handler<S, E>(events: &mut S) -> usize
where
    S: Stream<Item = std::result::Result<(), E>> + Unpin,
    E: std::fmt::Display,
{
    let mut polled = 0;
    while let Some(event) = events.next().await {
        polled += 1;
        if let Err(e) = event {
            debug!("CDP handler error: {}", e);
        }
    }
    debug!("CDP handler event loop ended");
    polled
}

async fn open_page(browser: &Browser) -> Result<Page> {
    let page = browser.new_page("about:blank").await?;
    page.execute(SetLifecycleEventsEnabledParams::new(true)).await?;
    Ok(page)
}

/// Release the browser held by `session`
pub async fn teardown(session: CaptureSession) {
    session.close().await;
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
