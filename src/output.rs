//! Output dispatch: route visible records to an adapter and a destination.

use anyhow::{bail, Context};
use clap::ValueEnum;
use redeem_core::{config::Config, RedemptionRecord};
use redeem_export::{
    csv::{write_csv, CsvOptions},
    table::render_table,
    xlsx::write_xlsx_file,
    Column,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table with a record count line.
    Table,
    Csv,
    Json,
    /// Excel workbook; needs a file destination.
    Xlsx,
}

impl OutputFormat {
    /// Whether an empty record set still produces output. JSON consumers
    /// always get a document (`[]`).
    pub fn writes_empty(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Write `records` to `output`, or to stdout when it is `None`.
pub fn write_output(
    format: OutputFormat,
    records: &[RedemptionRecord],
    columns: &[Column],
    config: &Config,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match (format, output) {
        (OutputFormat::Xlsx, None) => bail!("xlsx output needs a file: pass --output"),
        (OutputFormat::Xlsx, Some(path)) => {
            write_xlsx_file(path, records, columns, &config.labels)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        (_, Some(path)) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_stream(format, records, columns, config, &mut out)?;
            out.flush()?;
        }
        (_, None) => write_stream(format, records, columns, config, std::io::stdout().lock())?,
    }

    if let Some(path) = output {
        tracing::info!(path = %path.display(), rows = records.len(), ?format, "wrote output");
    }
    Ok(())
}

/// Write a text format to `out`. Workbooks are binary and file-only.
pub fn write_stream<W: Write>(
    format: OutputFormat,
    records: &[RedemptionRecord],
    columns: &[Column],
    config: &Config,
    mut out: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}件の引き換えが見つかりました", records.len())?;
            out.write_all(render_table(records, columns, &config.labels).as_bytes())?;
        }
        OutputFormat::Csv => {
            let opts = CsvOptions { bom: config.export.bom };
            write_csv(&mut out, records, columns, &config.labels, opts)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Xlsx => bail!("xlsx output needs a file: pass --output"),
    }
    Ok(())
}
