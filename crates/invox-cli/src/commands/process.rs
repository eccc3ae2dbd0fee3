//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use invox_core::models::invoice::InvoiceRecord;
use invox_core::pdf::PdfDocumentReader;
use invox_core::pipeline::InvoicePipeline;
use invox_core::report::ReportWriter;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List the fields that could not be found
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // No setting applies to a single file, but a broken config is still an error
    super::config::load(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pipeline = InvoicePipeline::new(PdfDocumentReader::new());
    let outcome = pipeline.process_document(&args.input);

    if let Some(error) = &outcome.error {
        eprintln!(
            "{} Could not read {}: {}",
            style("⚠").yellow(),
            args.input.display(),
            error
        );
    }

    let output = format_record(&outcome.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        if outcome.missing_fields.is_empty() {
            eprintln!("{} All fields found", style("ℹ").blue());
        } else {
            eprintln!(
                "{} Missing fields: {}",
                style("ℹ").blue(),
                outcome.missing_fields.join(", ")
            );
        }
    }

    eprintln!(
        "{} Processed in {} ms",
        style("ℹ").blue(),
        outcome.processing_time_ms
    );

    Ok(())
}

fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => Ok(ReportWriter::to_csv_string(std::slice::from_ref(record))?),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_text(record: &InvoiceRecord) -> String {
    let show = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut output = String::new();
    output.push_str(&format!("File:           {}\n", record.source_file));
    output.push_str(&format!("Invoice number: {}\n", show(record.invoice_number.as_deref())));
    output.push_str(&format!("Vendor:         {}\n", show(record.vendor_name.as_deref())));
    output.push_str(&format!("Invoice date:   {}\n", show(record.invoice_date.as_deref())));
    output.push_str(&format!(
        "Amount:         {}\n",
        record
            .invoice_amount
            .map(invox_core::invoice::rules::format_currency)
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!("Due date:       {}\n", show(record.due_date.as_deref())));
    output.push_str(&format!(
        "Payment status: {}\n",
        show(record.payment_status.as_ref().map(|s| s.as_str()))
    ));

    output
}
