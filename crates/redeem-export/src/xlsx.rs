//! Excel workbook export.
//!
//! One worksheet named [`SHEET_NAME`] with a label header row followed by one
//! row per record, every cell written as text.

use crate::{Column, ExportError};
use redeem_core::{config::Labels, RedemptionRecord};
use rust_xlsxwriter::{ColNum, RowNum, Workbook};
use std::path::Path;

pub const SHEET_NAME: &str = "引き換え履歴";

/// Column width in characters.
fn width(column: Column) -> f64 {
    match column {
        Column::RedeemedAt => 20.0,
        Column::UserId => 14.0,
        Column::UserLogin | Column::UserName => 25.0,
        Column::RewardTitle => 30.0,
        Column::Redeemer => 35.0,
    }
}

/// Lay the records out in a new workbook.
pub fn build_workbook(
    records: &[RedemptionRecord],
    columns: &[Column],
    labels: &Labels,
) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0..).zip(columns) {
        let col: ColNum = col;
        sheet.set_column_width(col, width(*column))?;
        sheet.write_string(0, col, column.label(labels))?;
    }

    for (row, record) in (1..).zip(records) {
        let row: RowNum = row;
        for (col, column) in (0..).zip(columns) {
            sheet.write_string(row, col, column.value(record))?;
        }
    }

    Ok(workbook)
}

/// Serialize the workbook to `.xlsx` bytes.
pub fn to_xlsx_bytes(
    records: &[RedemptionRecord],
    columns: &[Column],
    labels: &Labels,
) -> Result<Vec<u8>, ExportError> {
    Ok(build_workbook(records, columns, labels)?.save_to_buffer()?)
}

/// Create (or truncate) `path` and write the workbook to it.
pub fn write_xlsx_file(
    path: &Path,
    records: &[RedemptionRecord],
    columns: &[Column],
    labels: &Labels,
) -> Result<(), ExportError> {
    build_workbook(records, columns, labels)?.save(path)?;
    Ok(())
}
