//! redeem-core — reward redemption extraction from overlay bot log exports.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across them.
//!
//! # Architecture
//!
//! ```text
//! input ──► coalesce ──► extract ──► filter ──► (export)
//! ```
//!
//! Every stage is a synchronous pure function of its input. The caller owns
//! the last record set and the filter toggle between runs.

pub mod coalesce;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod input;
pub mod timestamp;
pub mod types;

pub use coalesce::{coalesce, coalesce_with};
pub use error::{ConfigError, InputError};
pub use extract::{extract, ExtractionReport, Extractor, SkipReason, SkippedEntry};
pub use filter::filter;
pub use types::{CoalescedEntry, RawLogEntry, RedemptionRecord};
