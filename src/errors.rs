use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Errors produced while discovering, launching or driving the browser
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Bad CLI input or an unusable default (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An explicitly requested browser binary does not exist (exit code 4)
    #[error("Browser executable not found: {}", .0.display())]
    BrowserNotFound(PathBuf),

    /// The browser process could not be started (exit code 4)
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    /// Navigation to the target URL failed (exit code 1)
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// A wait did not complete in time (exit code 5)
    #[error("Operation timed out: {what} after {}ms", .after.as_millis())]
    Timeout { what: String, after: Duration },

    /// The screenshot could not be written (exit code 1)
    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other DevTools protocol failure (exit code 1)
    #[error("Browser error: {0}")]
    Browser(#[from] CdpError),

    /// Some viewports failed while running with --keep-going (exit code 6)
    #[error("{} capture(s) failed: {}", .failed.len(), .failed.join(", "))]
    PartialFailure { failed: Vec<String> },
}

impl CaptureError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CaptureError::InvalidConfig(_) => 2,
            CaptureError::BrowserNotFound(_) | CaptureError::BrowserLaunch(_) => 4,
            CaptureError::Timeout { .. } => 5,
            CaptureError::PartialFailure { .. } => 6,
            CaptureError::Navigation { .. }
            | CaptureError::Output { .. }
            | CaptureError::Browser(_) => 1,
        }
    }
}

pub type Result<T, E = CaptureError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
