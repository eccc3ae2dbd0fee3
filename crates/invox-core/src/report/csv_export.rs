//! CSV rendering of the data sheet.

use std::io::Write;

use crate::models::invoice::{InvoiceRecord, RECORD_COLUMNS};

/// Write a header row and one row per record; missing values are empty cells.
pub(crate) fn write_records<W: Write>(writer: W, records: &[InvoiceRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(RECORD_COLUMNS)?;
    for record in records {
        wtr.write_record(record.to_row().iter().map(|v| v.as_deref().unwrap_or("")))?;
    }

    wtr.flush()?;
    Ok(())
}
