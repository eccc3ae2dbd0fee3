//! Batch processing command - extract many invoices into one report.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use invox_core::models::config::InvoxConfig;
use invox_core::pdf::PdfDocumentReader;
use invox_core::pipeline::{BatchOutcome, InvoicePipeline};
use invox_core::report::ReportWriter;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    #[command(flatten)]
    report: ReportArgs,
}

/// Report options shared by `batch` and `run`.
#[derive(Args)]
pub struct ReportArgs {
    /// Output directory (default: configured output directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the invoice data as CSV
    #[arg(long)]
    csv: bool,

    /// Number of parallel workers (default: configured max_workers)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

impl ReportArgs {
    /// Apply command-line overrides to the loaded configuration.
    pub fn apply(&self, config: &mut InvoxConfig) {
        if let Some(output_dir) = &self.output_dir {
            config.paths.output_dir = output_dir.clone();
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.report.apply(&mut config);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    report_files(files, &config, &args.report).await?;
    Ok(())
}

/// Extract every file and write the report. Returns the report path.
pub async fn report_files(
    files: Vec<PathBuf>,
    config: &InvoxConfig,
    args: &ReportArgs,
) -> anyhow::Result<PathBuf> {
    let start = Instant::now();
    let jobs = args.jobs.unwrap_or(config.processing.max_workers).max(1);
    let total = files.len();

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = Arc::new(InvoicePipeline::new(PdfDocumentReader::new()));

    // Documents are independent; `buffered` keeps results in input order
    let results: Vec<_> = stream::iter(files)
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            tokio::task::spawn_blocking(move || pipeline.process_document(&path))
        })
        .buffered(jobs)
        .inspect(|result| {
            if let Ok(outcome) = result {
                debug!(
                    "{} done in {} ms",
                    outcome.path.display(),
                    outcome.processing_time_ms
                );
            }
            progress.inc(1);
        })
        .collect()
        .await;
    let batch: BatchOutcome = results.into_iter().collect::<Result<_, _>>()?;

    progress.finish_and_clear();

    let failed: Vec<_> = batch.failed().collect();
    if !failed.is_empty() {
        println!("{}", style("Unreadable files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let records = match batch.reportable_records() {
        Ok(records) => records,
        Err(e) => {
            error!("Nothing to report: {}", e);
            anyhow::bail!("Nothing to report: {}", e);
        }
    };

    let output_dir = &config.paths.output_dir;
    fs::create_dir_all(output_dir)?;

    let mut report_config = config.report.clone();
    report_config.write_csv |= args.csv;
    let writer = ReportWriter::new(report_config);
    let report_path = writer.report_path(output_dir, Local::now().naive_local());

    let summary = writer.write(&records, &report_path)?;
    debug!("Report written in {:?}", start.elapsed());

    println!();
    println!(
        "{} Report created: {}",
        style("✓").green(),
        report_path.display()
    );
    println!(
        "   {} of {} documents reported, {} unreadable",
        style(summary.total_invoices).green(),
        total,
        style(failed.len()).red()
    );
    println!("   Total amount: {}", summary.formatted_total());
    println!("   Unique vendors: {}", summary.unique_vendors);
    println!("   Finished in {:?}", start.elapsed());

    Ok(report_path)
}
