//! CSV export with spreadsheet-friendly defaults.

use crate::{Column, ExportError};
use redeem_core::{config::Labels, RedemptionRecord};
use std::{fs::File, io::Write, path::Path};

const BOM: &str = "\u{feff}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Write a UTF-8 byte-order mark first so Excel detects the encoding.
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// Write a header row followed by one row per record.
pub fn write_csv<W: Write>(
    mut out: W,
    records: &[RedemptionRecord],
    columns: &[Column],
    labels: &Labels,
    opts: CsvOptions,
) -> Result<(), ExportError> {
    if opts.bom {
        out.write_all(BOM.as_bytes())?;
    }

    let mut wtr = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(columns.iter().map(|c| c.label(labels)))?;
    for record in records {
        wtr.write_record(columns.iter().map(|c| c.value(record).into_owned()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the CSV to it.
pub fn write_csv_file(
    path: &Path,
    records: &[RedemptionRecord],
    columns: &[Column],
    labels: &Labels,
    opts: CsvOptions,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(std::io::BufWriter::new(file), records, columns, labels, opts)
}
