use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use e2e_reporter::report;
use e2e_reporter::session::state::RunSummary;
use e2e_reporter::utils::config::ReportConfig;

#[derive(Parser)]
#[command(name = "e2e-reporter")]
#[command(version = "0.1.0")]
#[command(about = "Test session reporting for browser E2E suites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from captured session results
    Render {
        /// Path to session results JSON
        results: PathBuf,

        /// Output format (html, json, junit)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path (defaults to a timestamp-named file in the
        /// reports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reports directory (defaults to ./reports, or REPORTS_DIR)
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Custom HTML template with ${...} placeholders
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the session summary to the console
    Summary {
        /// Path to session results JSON
        results: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            results,
            format,
            output,
            reports_dir,
            template,
        } => {
            let mut config = ReportConfig::from_env();
            if let Some(dir) = reports_dir {
                config.reports_dir = dir;
            }
            if let Some(template) = template {
                config.template_path = Some(template);
            }
            report::generate_report(&results, &format, &config, output.as_deref())
        }
        Commands::Summary { results } => print_summary(&results),
    }
}

fn print_summary(results_path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(results_path)?;
    let results: report::types::SessionResults = serde_json::from_str(&raw)?;
    let summary = RunSummary::tally(&results.records);

    println!(
        "\n{} Test session {}",
        "■".blue().bold(),
        results.session_id.cyan()
    );
    println!("  Total tests: {}", summary.total());
    println!(
        "  {} passed, {} failed, {} skipped, {} errors",
        summary.passed.to_string().green(),
        summary.failed.to_string().red(),
        summary.skipped.to_string().yellow(),
        summary.errors.to_string().red()
    );
    println!("  Duration: {:.2}s", summary.total_duration_secs);

    Ok(())
}
