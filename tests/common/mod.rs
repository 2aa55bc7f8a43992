// Common test utilities and fixtures

use std::process::Command;
use viewshot::Executable;

/// Check if a command exists in PATH
fn command_exists(command: &str) -> bool {
    #[cfg(unix)]
    {
        Command::new("which")
            .arg(command)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[cfg(windows)]
    {
        Command::new("where")
            .arg(command)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

/// Whether a Chrome/Chromium is installed for the browser tests
pub fn browser_available() -> bool {
    if let Executable::Path(_) = viewshot::discover_executable() {
        return true;
    }
    std::env::var_os("CHROME").is_some()
        || ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser", "chrome"]
            .iter()
            .any(|c| command_exists(c))
}

/// Skip the calling test when no browser is installed
macro_rules! require_browser {
    () => {
        if !common::browser_available() {
            eprintln!("Skipping: no Chrome/Chromium found");
            return Ok(());
        }
    };
}

/// A localhost URL nothing is listening on
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
