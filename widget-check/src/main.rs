//! Widget Check - Verifies the chat widget's HTML matches the chat API contract.
//!
//! Usage: `widget_check [PATH]` (defaults to `index.html`).

mod checks;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use checks::{ExpectedApi, Report};

fn read_html(path: &Path) -> Result<String> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if html.is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(html)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("index.html"));

    let html = match read_html(&path) {
        Ok(html) => html,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Could not read HTML file");
            println!("❌ Error: Could not read HTML file");
            return ExitCode::FAILURE;
        }
    };

    let report = Report::run(&html, &ExpectedApi::from_env());
    print!("{}", report);

    for section in report.sections.iter().filter(|section| !section.all_passed()) {
        warn!(section = section.title, failed = ?section.failed(), "Widget checks failed");
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
