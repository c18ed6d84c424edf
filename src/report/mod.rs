pub mod artifact;
pub mod case;
pub mod html;
pub mod json;
pub mod junit;
pub mod template;
pub mod types;

use anyhow::{Context, Result};
use std::path::Path;

use crate::session::state::RunSummary;
use crate::utils::config::ReportConfig;

/// Generate a report from captured session results
pub fn generate_report(
    results_path: &Path,
    format: &str,
    config: &ReportConfig,
    output: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("failed to read results {}", results_path.display()))?;
    let mut results: types::SessionResults = serde_json::from_str(&raw)?;

    // The summary is derived data: re-tally instead of trusting the file.
    results.summary = RunSummary::tally(&results.records);

    match format {
        "json" => json::generate(&results, output),
        "junit" => junit::write_report(&results, &config.reports_dir),
        "html" => html::write_report(&results.records, config, output).map(|_| ()),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
