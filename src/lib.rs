//! # viewshot
#![allow(clippy::uninlined_format_args)]
//!
//! Capture full-page screenshots of a web page at several viewport sizes
//! using a headless Chrome/Chromium driven over the DevTools protocol.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Capture http://127.0.0.1:8080/ at mobile, tablet and desktop sizes
//! # into assets/screenshots/{mobile,tablet,desktop}.png
//! viewshot
//!
//! # Different page and output directory
//! viewshot --url http://localhost:3000/pricing --output-dir /tmp/shots
//!
//! # Custom viewports (replaces the defaults, captured in the given order)
//! viewshot --viewport phone=390x844 --viewport wide=2560x1440
//!
//! # Keep going when one viewport fails, report as JSON
//! viewshot --keep-going --format json
//!
//! # Use a specific browser binary
//! viewshot --browser-path /opt/chromium/chrome
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use viewshot::{RunConfig, run};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RunConfig::default();
//! let report = run(&config, |saved| println!("Saved {}", saved.path.display())).await?;
//! assert_eq!(report.captured.len(), 3);
//! # Ok(())
//! # }
//! ```

/// Per-viewport capture loop
pub mod capture;

/// Defaults and run configuration
pub mod config;

/// Error type with exit codes
pub mod errors;

/// Browser binary discovery
pub mod executable;

/// Network-idle detection from page lifecycle events
pub mod network_idle;

/// Headless browser session
pub mod session;

/// Viewports and capture results
pub mod types;

pub use capture::{capture, capture_all, run};
pub use config::{CaptureTarget, FailurePolicy, RunConfig, default_viewports};
pub use errors::CaptureError;
pub use executable::{CandidateProvider, Executable, discover_executable};
pub use session::{CaptureSession, LaunchOptions, launch_session, teardown};
pub use types::{CaptureOutcome, CaptureReport, OutputFormat, ViewportSize, ViewportSpec};
