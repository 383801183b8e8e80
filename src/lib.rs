//! redeem — extract channel-point reward redemptions from overlay bot logs.
//!
//! This crate ties the pipeline crates together for the binary and the
//! integration harnesses.
//!
//! # Architecture
//!
//! ```text
//! read_document ──► coalesce ──► extract ──► Session ──► filter ──► write_output
//! ```
//!
//! The [`Session`] is the only state that outlives a pipeline run: the last
//! record set and the filter toggle. Re-filtering never re-parses the input.

pub mod output;

pub use output::{write_output, OutputFormat};
pub use redeem_core;
pub use redeem_export;

use redeem_core::{
    config::Config, coalesce_with, error::InputError, ExtractionReport, Extractor, RawLogEntry,
    RedemptionRecord,
};
use std::path::Path;

/// Run coalesce and extract over an in-memory document.
pub fn run_pipeline(
    entries: &[RawLogEntry],
    config: &Config,
    extractor: &Extractor,
) -> ExtractionReport {
    let coalesced = coalesce_with(entries, config.coalesce.tolerance());
    extractor.extract_with_report(&coalesced)
}

/// Caller-owned view state: the last extracted records plus the reward filter.
#[derive(Debug, Clone, Default)]
pub struct Session {
    records: Vec<RedemptionRecord>,
    filter_title: Option<String>,
}

impl Session {
    pub fn new(filter_title: Option<String>) -> Self {
        Self {
            records: Vec::new(),
            filter_title,
        }
    }

    /// Replace the record set with the result of processing `path`.
    ///
    /// On error the previous records are left untouched.
    pub fn load_file(
        &mut self,
        path: &Path,
        config: &Config,
        extractor: &Extractor,
    ) -> Result<ExtractionReport, InputError> {
        let entries = redeem_core::input::read_document(path)?;
        let report = run_pipeline(&entries, config, extractor);
        self.records = report.records.clone();
        Ok(report)
    }

    pub fn set_records(&mut self, records: Vec<RedemptionRecord>) {
        self.records = records;
    }

    pub fn set_filter(&mut self, title: Option<String>) {
        self.filter_title = title;
    }

    pub fn filter_title(&self) -> Option<&str> {
        self.filter_title.as_deref()
    }

    /// Every record from the last run, unfiltered.
    pub fn records(&self) -> &[RedemptionRecord] {
        &self.records
    }

    /// Records passing the current filter.
    pub fn visible(&self) -> Vec<RedemptionRecord> {
        redeem_core::filter(&self.records, self.filter_title())
    }
}
