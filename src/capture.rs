use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventLifecycleEvent, NavigateParams,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::Stream;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{FailurePolicy, RunConfig};
use crate::errors::{CaptureError, Result};
use crate::executable::resolve_executable;
use crate::network_idle::{wait_for_network_idle, LifecycleSignal};
use crate::session::{launch_session, teardown, CaptureSession, LaunchOptions};
use crate::types::{CaptureFailure, CaptureOutcome, CaptureReport, ViewportSpec};

/// Capture one viewport: resize, load, settle, then save a full-page PNG
pub async fn capture(
    session: &CaptureSession,
    viewport: &ViewportSpec,
    url: &Url,
    output_path: &Path,
    settle: Duration,
    navigation_timeout: Duration,
) -> Result<CaptureOutcome> {
    let page = session.page();

    debug!(
        "Setting viewport {} to {}x{}",
        viewport.name, viewport.width, viewport.height
    );
    page.execute(SetDeviceMetricsOverrideParams::new(
        viewport.width,
        viewport.height,
        1.0,
        false,
    ))
    .await?;

    // Subscribe before navigating so no lifecycle event is missed
    let events = page.event_listener::<EventLifecycleEvent>().await?;
    let frame_id = page.mainframe().await?.map(|id| id.inner().clone());

    let load = navigate_until_idle(page, url, Box::pin(events), frame_id, navigation_timeout);
    match tokio::time::timeout(navigation_timeout, load).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(CaptureError::Timeout {
                what: format!("loading {} for {}", url, viewport.name),
                after: navigation_timeout,
            });
        }
    }
    debug!("Network idle for {}", viewport.name);

    tokio::time::sleep(settle).await;

    let png = page
        .screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(true)
                .build(),
        )
        .await?;

    tokio::fs::write(output_path, &png)
        .await
        .map_err(|source| CaptureError::Output {
            path: output_path.to_path_buf(),
            source,
        })?;

    info!(
        "Captured {} ({} bytes) to {}",
        viewport.name,
        png.len(),
        output_path.display()
    );

    Ok(CaptureOutcome {
        viewport: viewport.clone(),
        path: output_path.to_path_buf(),
        bytes: png.len(),
    })
}

async fn navigate_until_idle<S>(
    page: &Page,
    url: &Url,
    events: S,
    frame_id: Option<String>,
    timeout: Duration,
) -> Result<()>
where
    S: Stream + Unpin,
    S::Item: LifecycleSignal,
{
    let nav = page.execute(NavigateParams::new(url.as_str())).await?;
    if let Some(error_text) = &nav.result.error_text {
        return Err(CaptureError::Navigation {
            url: url.to_string(),
            message: error_text.clone(),
        });
    }

    wait_for_network_idle(events, frame_id, timeout)
        .await
        .map_err(|e| match e {
            CaptureError::Navigation { message, .. } => CaptureError::Navigation {
                url: url.to_string(),
                message,
            },
            other => other,
        })
}

/// Capture every configured viewport in order on the session's page.
///
/// `on_saved` runs after each file is written, before the next viewport
/// starts.
pub async fn capture_all<F>(
    session: &CaptureSession,
    config: &RunConfig,
    mut on_saved: F,
) -> Result<CaptureReport>
where
    F: FnMut(&CaptureOutcome),
{
    let mut report = CaptureReport {
        url: config.target.url.to_string(),
        ..CaptureReport::default()
    };

    for viewport in &config.viewports {
        let output_path = config.target.output_path(viewport);
        info!(
            "Capturing {} at {}x{}",
            viewport.name, viewport.width, viewport.height
        );

        match capture(
            session,
            viewport,
            &config.target.url,
            &output_path,
            config.settle,
            config.navigation_timeout,
        )
        .await
        {
            Ok(outcome) => {
                on_saved(&outcome);
                report.captured.push(outcome);
            }
            Err(e) if config.failure_policy == FailurePolicy::Continue => {
                warn!("Capture of {} failed: {}", viewport.name, e);
                report.failed.push(CaptureFailure {
                    viewport: viewport.name.clone(),
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// Discover a browser, capture all viewports, and always close the browser
pub async fn run<F>(config: &RunConfig, on_saved: F) -> Result<CaptureReport>
where
    F: FnMut(&CaptureOutcome),
{
    config.validate()?;

    let executable = resolve_executable(config.browser_path.as_deref())?;

    tokio::fs::create_dir_all(&config.target.output_dir)
        .await
        .map_err(|source| CaptureError::Output {
            path: config.target.output_dir.clone(),
            source,
        })?;

    let options = LaunchOptions {
        request_timeout: config.navigation_timeout,
    };
    let session = launch_session(&executable, &options).await?;

    let result = capture_all(&session, config, on_saved).await;
    teardown(session).await;
    result
}
