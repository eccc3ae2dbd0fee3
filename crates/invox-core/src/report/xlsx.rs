//! Two-sheet XLSX workbook output.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use super::summary::ReportSummary;
use crate::models::config::ReportConfig;
use crate::models::invoice::{InvoiceRecord, RECORD_COLUMNS};

const AMOUNT_COLUMN: u16 = 3;

/// Write the data and summary sheets to `path`.
pub(crate) fn write_workbook(
    config: &ReportConfig,
    records: &[InvoiceRecord],
    summary: &ReportSummary,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let data = workbook.add_worksheet().set_name(&config.data_sheet)?;
    write_data_sheet(data, records, &header)?;

    let totals = workbook.add_worksheet().set_name(&config.summary_sheet)?;
    write_summary_sheet(totals, summary, &header)?;

    workbook.save(path)?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn write_data_sheet(
    sheet: &mut Worksheet,
    records: &[InvoiceRecord],
    header: &Format,
) -> Result<(), XlsxError> {
    for (col, name) in RECORD_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, header)?;
    }

    let amount_format = Format::new().set_num_format("#,##0.00");

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;

        if let Some(amount) = record.invoice_amount {
            sheet.write_number_with_format(row, AMOUNT_COLUMN, amount, &amount_format)?;
        }

        // Text cells; missing values stay blank
        for (col, value) in record.to_row().iter().enumerate() {
            if col as u16 == AMOUNT_COLUMN {
                continue;
            }
            if let Some(value) = value {
                sheet.write_string(row, col as u16, value.as_str())?;
            }
        }
    }

    sheet.set_column_width(1, 32)?;
    sheet.set_column_width(6, 40)?;
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    summary: &ReportSummary,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.write_string_with_format(0, 0, "Metric", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;

    sheet.write_string(1, 0, "Total Invoices")?;
    sheet.write_number(1, 1, summary.total_invoices as f64)?;

    sheet.write_string(2, 0, "Total Amount")?;
    sheet.write_string(2, 1, summary.formatted_total())?;

    sheet.write_string(3, 0, "Unique Vendors")?;
    sheet.write_number(3, 1, summary.unique_vendors as f64)?;

    sheet.set_column_width(0, 18)?;
    Ok(())
}
