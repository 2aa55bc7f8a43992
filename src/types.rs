use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{CaptureError, Result};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One "Saved <path>" line per capture
    #[default]
    Simple,
    /// A single JSON capture report
    Json,
}

/// Browser viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            return Err(CaptureError::InvalidConfig(format!(
                "Invalid viewport format '{}'. Use WIDTHxHEIGHT (e.g., 1920x1080)",
                s
            )));
        }

        let width = parts[0]
            .parse::<u32>()
            .map_err(|_| CaptureError::InvalidConfig(format!("Invalid width in '{}'", s)))?;
        let height = parts[1]
            .parse::<u32>()
            .map_err(|_| CaptureError::InvalidConfig(format!("Invalid height in '{}'", s)))?;

        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidConfig(format!(
                "Viewport dimensions must be non-zero: '{}'",
                s
            )));
        }

        Ok(ViewportSize { width, height })
    }
}

/// A named viewport to capture, e.g. `mobile` at 375x667
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSpec {
    /// Name used for the output file (`<name>.png`)
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl ViewportSpec {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Parse "name=WIDTHxHEIGHT" (e.g., "phone=390x844")
    pub fn parse(s: &str) -> Result<Self> {
        let (name, size) = s.split_once('=').ok_or_else(|| {
            CaptureError::InvalidConfig(format!(
                "Invalid viewport '{}'. Use NAME=WIDTHxHEIGHT (e.g., mobile=375x667)",
                s
            ))
        })?;

        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(CaptureError::InvalidConfig(format!(
                "Invalid viewport name in '{}'",
                s
            )));
        }

        let size = ViewportSize::parse(size.trim())?;
        Ok(Self::new(name, size.width, size.height))
    }

    pub fn size(&self) -> ViewportSize {
        ViewportSize {
            width: self.width,
            height: self.height,
        }
    }

    /// File name of the screenshot for this viewport
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// Result of one successful capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub viewport: ViewportSpec,
    /// Where the PNG was written
    pub path: PathBuf,
    /// Size of the PNG in bytes
    pub bytes: usize,
}

/// A viewport that could not be captured
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureFailure {
    pub viewport: String,
    pub message: String,
}

/// Everything a run produced, in capture order
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CaptureReport {
    pub url: String,
    pub captured: Vec<CaptureOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failed: Vec<CaptureFailure>,
}

impl CaptureReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
