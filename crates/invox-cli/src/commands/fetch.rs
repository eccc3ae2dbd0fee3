//! Fetch command - save invoice attachments from a mailbox directory.

use std::path::PathBuf;

use clap::Args;
use console::style;

use invox_core::mail::{FetchSummary, MailIntake};
use invox_core::models::config::InvoxConfig;

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Directory of .eml messages (default: configured mailbox_dir)
    #[arg(short, long)]
    mailbox: Option<PathBuf>,

    /// Where attachments are saved (default: configured input_dir)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Only consider messages from the last N days
    #[arg(short, long)]
    days: Option<u32>,

    /// Move handled messages into this directory
    #[arg(long)]
    archive: Option<PathBuf>,
}

impl FetchArgs {
    /// Apply command-line overrides to the loaded configuration.
    pub fn apply(&self, config: &mut InvoxConfig) {
        if let Some(mailbox) = &self.mailbox {
            config.mail.mailbox_dir = mailbox.clone();
        }
        if let Some(input_dir) = &self.input_dir {
            config.paths.input_dir = input_dir.clone();
        }
        if let Some(days) = self.days {
            config.mail.days_back = days;
        }
        if let Some(archive) = &self.archive {
            config.mail.archive_dir = Some(archive.clone());
        }
    }
}

pub async fn run(args: FetchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.apply(&mut config);

    fetch(&config)?;
    Ok(())
}

/// Run mailbox intake and print what was saved.
pub fn fetch(config: &InvoxConfig) -> anyhow::Result<FetchSummary> {
    println!(
        "{} Checking {} for invoices from the last {} days",
        style("ℹ").blue(),
        config.mail.mailbox_dir.display(),
        config.mail.days_back
    );

    let intake = MailIntake::new(config.mail.clone(), config.paths.input_dir.clone());
    let summary = intake.fetch()?;

    println!(
        "{} Downloaded {} files from {} emails",
        style("✓").green(),
        summary.files_downloaded,
        summary.emails_found
    );
    for path in &summary.downloaded_files {
        println!("  - {}", path.display());
    }

    Ok(summary)
}
