use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::{CaptureError, Result};
use crate::types::ViewportSpec;

/// Page captured when no `--url` is given
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080/";

/// Directory screenshots are written to when no `--output-dir` is given
pub const DEFAULT_OUTPUT_DIR: &str = "assets/screenshots";

/// Grace period after network idle for late animations and web fonts
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the navigation timeout; the browser adds it to `Instant::now()`
pub const MAX_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(3600);

/// Default viewports, in capture order
pub const DEFAULT_VIEWPORTS: [(&str, u32, u32); 3] = [
    ("mobile", 375, 667),
    ("tablet", 768, 1024),
    ("desktop", 1366, 768),
];

pub fn default_viewports() -> Vec<ViewportSpec> {
    DEFAULT_VIEWPORTS
        .iter()
        .map(|(name, width, height)| ViewportSpec::new(*name, *width, *height))
        .collect()
}

/// What to do when a single viewport fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure; later viewports are not captured
    #[default]
    Abort,
    /// Record the failure and move on to the next viewport
    Continue,
}

/// The page to capture and where to put the results
#[derive(Debug, Clone)]
pub struct CaptureTarget {
    pub url: Url,
    pub output_dir: PathBuf,
}

impl CaptureTarget {
    pub fn new(url: &str, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| CaptureError::InvalidConfig(format!("Invalid URL '{}': {}", url, e)))?;
        Ok(Self {
            url,
            output_dir: output_dir.into(),
        })
    }

    /// Output path for a viewport: `<output_dir>/<name>.png`
    pub fn output_path(&self, viewport: &ViewportSpec) -> PathBuf {
        self.output_dir.join(viewport.file_name())
    }
}

/// Everything a capture run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: CaptureTarget,
    pub viewports: Vec<ViewportSpec>,
    pub settle: Duration,
    pub navigation_timeout: Duration,
    /// Explicit browser binary; skips discovery when set
    pub browser_path: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target: CaptureTarget {
                url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            },
            viewports: default_viewports(),
            settle: DEFAULT_SETTLE,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            browser_path: None,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl RunConfig {
    /// Reject configurations that cannot produce a sensible run
    pub fn validate(&self) -> Result<()> {
        if self.viewports.is_empty() {
            return Err(CaptureError::InvalidConfig(
                "At least one viewport is required".to_string(),
            ));
        }

        // Two viewports with the same name would overwrite each other's file
        for (i, vp) in self.viewports.iter().enumerate() {
            if self.viewports[..i].iter().any(|other| other.name == vp.name) {
                return Err(CaptureError::InvalidConfig(format!(
                    "Duplicate viewport name '{}'",
                    vp.name
                )));
            }
        }

        if self.navigation_timeout.is_zero() {
            return Err(CaptureError::InvalidConfig(
                "Navigation timeout must be greater than zero".to_string(),
            ));
        }

        if self.navigation_timeout > MAX_NAVIGATION_TIMEOUT {
            return Err(CaptureError::InvalidConfig(format!(
                "Navigation timeout must be at most {}s",
                MAX_NAVIGATION_TIMEOUT.as_secs()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
