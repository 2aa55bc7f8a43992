//! Locating a Chrome/Chromium binary to drive.
//!
//! Each platform contributes a ranked list of [`CandidateProvider`]s. The
//! first candidate path that exists wins; when none does, the launch falls
//! back to chromiumoxide's own browser detection.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{CaptureError, Result};

/// Which browser binary a session should launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// A binary found on disk (or given explicitly)
    Path(PathBuf),
    /// Let the automation layer pick its default browser
    Default,
}

/// A source of candidate browser paths, most preferred first
pub trait CandidateProvider {
    fn candidates(&self) -> Vec<PathBuf>;
}

/// A fixed list of paths
pub struct StaticCandidates(pub Vec<PathBuf>);

impl CandidateProvider for StaticCandidates {
    fn candidates(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}

/// Google Chrome in the machine-wide Windows install locations
pub struct WindowsSystemChrome;

impl CandidateProvider for WindowsSystemChrome {
    fn candidates(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
        ]
    }
}

/// Google Chrome installed per-user under `%LOCALAPPDATA%`
pub struct WindowsUserChrome;

impl CandidateProvider for WindowsUserChrome {
    fn candidates(&self) -> Vec<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| {
                vec![
                    dir.join("Google")
                        .join("Chrome")
                        .join("Application")
                        .join("chrome.exe"),
                ]
            })
            .unwrap_or_default()
    }
}

/// Application bundles in `/Applications`
pub struct MacApplications;

impl CandidateProvider for MacApplications {
    fn candidates(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ]
    }
}

/// Distribution and snap packages on Linux
pub struct LinuxPackages;

impl CandidateProvider for LinuxPackages {
    fn candidates(&self) -> Vec<PathBuf> {
        [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }
}

/// Providers for the platform this binary was built for
pub fn platform_providers() -> Vec<Box<dyn CandidateProvider>> {
    if cfg!(windows) {
        vec![Box::new(WindowsSystemChrome), Box::new(WindowsUserChrome)]
    } else if cfg!(target_os = "macos") {
        vec![Box::new(MacApplications)]
    } else {
        vec![Box::new(LinuxPackages)]
    }
}

/// Return the first candidate for which `exists` holds, in provider order
pub fn discover_with<F>(providers: &[Box<dyn CandidateProvider>], exists: F) -> Executable
where
    F: Fn(&Path) -> bool,
{
    for path in providers.iter().flat_map(|p| p.candidates()) {
        if exists(&path) {
            debug!("Found browser candidate {}", path.display());
            return Executable::Path(path);
        }
        debug!("No browser at {}", path.display());
    }
    Executable::Default
}

/// Scan the platform's candidate paths for an installed browser
pub fn discover_executable() -> Executable {
    let found = discover_with(&platform_providers(), Path::is_file);
    match &found {
        Executable::Path(path) => info!("Using browser at {}", path.display()),
        Executable::Default => info!("No known browser path found, using default detection"),
    }
    found
}

/// Use the explicit path if given, otherwise discover one
pub fn resolve_executable(explicit: Option<&Path>) -> Result<Executable> {
    match explicit {
        Some(path) if path.is_file() => {
            info!("Using browser at {}", path.display());
            Ok(Executable::Path(path.to_path_buf()))
        }
        Some(path) => Err(CaptureError::BrowserNotFound(path.to_path_buf())),
        None => Ok(discover_executable()),
    }
}

#[cfg(test)]
#[path = "executable_test.rs"]
mod executable_test;
