#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viewshot::config::{
    DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_OUTPUT_DIR, DEFAULT_SETTLE, DEFAULT_URL,
};
use viewshot::{
    CaptureError, CaptureTarget, FailurePolicy, OutputFormat, RunConfig, ViewportSpec,
    default_viewports,
};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_COMMAND_ERROR: i32 = 1;

#[derive(Parser)]
#[command(name = "viewshot")]
#[command(
    about = "Capture full-page screenshots at mobile, tablet and desktop viewports",
    long_about = None
)]
struct Cli {
    /// URL to capture
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Viewport as NAME=WIDTHxHEIGHT; repeat to capture several (replaces the defaults)
    #[arg(long = "viewport", value_name = "NAME=WIDTHxHEIGHT")]
    viewports: Vec<String>,

    /// Grace period after network idle, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE.as_millis() as u64)]
    settle_ms: u64,

    /// Navigation timeout per viewport, in seconds
    #[arg(long, default_value_t = DEFAULT_NAVIGATION_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Browser binary to launch (skips discovery)
    #[arg(long)]
    browser_path: Option<PathBuf>,

    /// Keep capturing remaining viewports when one fails
    #[arg(long)]
    keep_going: bool,

    /// Output format
    #[arg(short, long, default_value = "simple")]
    format: OutputFormat,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig, CaptureError> {
        let viewports = if self.viewports.is_empty() {
            default_viewports()
        } else {
            self.viewports
                .iter()
                .map(|v| ViewportSpec::parse(v.as_str()))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(RunConfig {
            target: CaptureTarget::new(&self.url, self.output_dir)?,
            viewports,
            settle: Duration::from_millis(self.settle_ms),
            navigation_timeout: Duration::from_secs(self.timeout_secs),
            browser_path: self.browser_path,
            failure_policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
        })
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let exit_code = err
                .downcast_ref::<CaptureError>()
                .map(CaptureError::exit_code)
                .unwrap_or(EXIT_COMMAND_ERROR);

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": err.to_string(),
                "exit_code": exit_code
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            std::process::exit(exit_code);
        }
    }
}

async fn run() -> Result<i32> {
    // Initialize tracing to stderr (so output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewshot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();
    let format = cli.format;
    let config = cli.into_config()?;

    let report = viewshot::run(&config, |saved| {
        if let OutputFormat::Simple = format {
            println!("Saved {}", saved.path.display());
        }
    })
    .await?;

    let partial = (!report.is_complete()).then(|| CaptureError::PartialFailure {
        failed: report.failed.iter().map(|f| f.viewport.clone()).collect(),
    });

    match (format, partial) {
        // The report already lists the failures; stdout stays one JSON document
        (OutputFormat::Json, partial) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(partial.map_or(EXIT_SUCCESS, |e| e.exit_code()))
        }
        (OutputFormat::Simple, Some(e)) => Err(e.into()),
        (OutputFormat::Simple, None) => Ok(EXIT_SUCCESS),
    }
}
