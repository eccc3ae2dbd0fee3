//! Run command - fetch invoices from the mailbox and report on them.

use clap::Args;
use console::style;

use super::batch::{report_files, ReportArgs};
use super::fetch::{fetch, FetchArgs};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    fetch: FetchArgs,

    #[command(flatten)]
    report: ReportArgs,
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.fetch.apply(&mut config);
    args.report.apply(&mut config);
    config.paths.ensure_dirs()?;

    println!("{}", style("Step 1: Fetching invoices").bold());
    let fetched = fetch(&config)?;

    if fetched.downloaded_files.is_empty() {
        anyhow::bail!("No invoices downloaded from {}", config.mail.mailbox_dir.display());
    }

    println!();
    println!("{}", style("Step 2: Extracting invoice data").bold());
    report_files(fetched.downloaded_files, &config, &args.report).await?;

    Ok(())
}
