use anyhow::Context;
use clap::{Parser, ValueEnum};
use redeem::{write_output, OutputFormat, Session};
use redeem_core::{config::Config, timestamp::DisplayZone};
use redeem_export::Column;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redeem", about = "Extract reward redemptions from an overlay bot log export")]
struct Cli {
    /// Exported log document (.json).
    file: PathBuf,

    /// Show every redemption instead of only the configured reward.
    #[arg(long, conflicts_with = "reward")]
    all: bool,

    /// Only keep redemptions of this reward title.
    #[arg(long)]
    reward: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long, value_enum, default_value_t = Columns::Record)]
    columns: Columns,

    /// Write to this path instead of stdout. Required for xlsx.
    #[arg(long, short, required_if_eq("format", "xlsx"))]
    output: Option<PathBuf>,

    /// Config file layered over the built-in defaults
    /// (default: ~/.config/redeem/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display timezone: local, utc, or +HH:MM. Overrides the config file.
    #[arg(long)]
    timezone: Option<String>,

    /// Log debug diagnostics to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Columns {
    /// Every record field.
    Record,
    /// Redeemer display name only.
    Redeemer,
}

impl Columns {
    fn layout(self) -> &'static [Column] {
        match self {
            Columns::Record => Column::RECORD,
            Columns::Redeemer => Column::REDEEMER,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to built-in config");
            Config::defaults()
        }),
    };
    if let Some(tz) = &cli.timezone {
        tz.parse::<DisplayZone>().map_err(anyhow::Error::msg)?;
        config.extract.timezone = tz.clone();
    }
    let extractor = config.extractor().context("invalid [extract] config")?;

    let filter_title = if cli.all {
        None
    } else {
        cli.reward
            .clone()
            .or_else(|| config.filter.active_title().map(str::to_string))
    };
    let mut session = Session::new(filter_title);

    let report = session
        .load_file(&cli.file, &config, &extractor)
        .context("ファイルの読み込みに失敗しました")?;
    if !report.skipped.is_empty() {
        tracing::warn!(skipped = report.skipped.len(), "some redemption entries were skipped");
    }

    let records = session.visible();
    if records.is_empty() {
        eprintln!("データがありません");
        if !cli.format.writes_empty() {
            return Ok(());
        }
    }

    write_output(
        cli.format,
        &records,
        cli.columns.layout(),
        &config,
        cli.output.as_deref(),
    )
}
