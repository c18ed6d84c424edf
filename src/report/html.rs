use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::case;
use super::template::ReportTemplate;
use crate::session::state::{RunSummary, TestResultRecord};
use crate::utils::config::ReportConfig;

/// Assemble the final report document.
///
/// Counts and total duration are tallied from the records here, and the
/// timestamp is taken at assembly time; the summary is never trusted from
/// stored data. Works on partial records (aborted runs) as-is.
pub fn assemble(records: &[TestResultRecord], template: &ReportTemplate) -> String {
    let summary = RunSummary::tally(records);

    let mut test_cases = String::new();
    for record in records {
        test_cases.push_str(&case::render(record));
        test_cases.push('\n');
    }

    template.substitute(&[
        ("timestamp", summary.timestamp.clone()),
        ("passed", summary.passed.to_string()),
        ("failed", summary.failed.to_string()),
        ("skipped", summary.skipped.to_string()),
        ("duration", format!("{:.2}s", summary.total_duration_secs)),
        ("test_cases", test_cases),
    ])
}

/// Write the report to disk.
///
/// Without an explicit `output` path the file is named
/// `report_<YYYYMMDD_HHMMSS>.html` inside the configured reports
/// directory, which is created if absent. Failures here are fatal and
/// propagate to the caller.
pub fn write_report(
    records: &[TestResultRecord],
    config: &ReportConfig,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let template = match &config.template_path {
        Some(path) => ReportTemplate::from_file(path)
            .with_context(|| format!("invalid report template {}", path.display()))?,
        None => ReportTemplate::builtin(),
    };

    let html = assemble(records, &template);

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(&config.reports_dir).with_context(|| {
                format!(
                    "failed to create reports directory {}",
                    config.reports_dir.display()
                )
            })?;
            let file_name = format!(
                "report_{}.html",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            );
            config.reports_dir.join(file_name)
        }
    };

    std::fs::write(&path, html)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    println!("HTML report saved to: {}", path.display());

    Ok(path)
}
