//! Event extractor — turns coalesced log text into [`RedemptionRecord`] values.
//!
//! Per entry: marker test → payload location → JSON parse → field mapping.
//! Every step is independent per entry; a defect in one entry is recorded in
//! the [`ExtractionReport`] and never affects its siblings. The result is
//! sorted ascending by the formatted redemption time.
//!
//! # Payload location
//!
//! Messages carry the event JSON somewhere inside free text, sometimes after
//! unrelated brace pairs and sometimes followed by more text. Candidate spans
//! are scanned brace-balanced (string-aware) from each `{` in order, and the
//! first balanced span containing the fingerprint is used. When no balanced
//! span exists, the greedy `{ … fingerprint … }` match is handed to the parser
//! so truncated payloads are reported rather than silently dropped.

use crate::{
    config::ExtractConfig,
    error::ConfigError,
    timestamp::{format_instant, parse_instant, DisplayZone},
    types::{CoalescedEntry, RedemptionRecord},
};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Substring that identifies a redemption log message.
pub const MARKER: &str = "REWARD REDEMPTION EVENT RECEIVED";

/// Literal that must appear inside the located payload span.
pub const FINGERPRINT: &str = r#""broadcaster_user_id""#;

/// Display pattern for `redeemed_at`. Lexicographic order equals time order.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Why a marked entry produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no payload span containing the fingerprint")]
    NoPayload,
    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position in the coalesced input.
    pub index: usize,
    pub timestamp: String,
    pub reason: SkipReason,
}

/// Records plus per-entry diagnostics from one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Sorted ascending by `redeemed_at`.
    pub records: Vec<RedemptionRecord>,
    /// Entries without the marker.
    pub unmarked: usize,
    /// Marked entries that yielded nothing.
    pub skipped: Vec<SkippedEntry>,
}

// ---------------------------------------------------------------------------
// Payload shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Payload {
    redeemed_at: Option<String>,
    user_id: Option<String>,
    user_login: Option<String>,
    user_name: Option<String>,
    reward: Option<RewardPayload>,
}

#[derive(Debug, Deserialize)]
struct RewardPayload {
    title: Option<String>,
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Configured extraction pass. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Extractor {
    marker: String,
    fingerprint: String,
    greedy: Regex,
    zone: DisplayZone,
    time_format: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            marker: MARKER.to_string(),
            fingerprint: FINGERPRINT.to_string(),
            greedy: greedy_pattern(FINGERPRINT).expect("escaped fingerprint is a valid pattern"),
            zone: DisplayZone::Local,
            time_format: TIME_FORMAT.to_string(),
        }
    }
}

impl Extractor {
    pub fn new(cfg: &ExtractConfig) -> Result<Self, ConfigError> {
        if cfg.marker.is_empty() {
            return Err(ConfigError::Empty("extract.marker"));
        }
        if cfg.fingerprint.is_empty() {
            return Err(ConfigError::Empty("extract.fingerprint"));
        }
        let zone = cfg
            .timezone
            .parse()
            .map_err(|_| ConfigError::Timezone(cfg.timezone.clone()))?;

        Ok(Self {
            marker: cfg.marker.clone(),
            fingerprint: cfg.fingerprint.clone(),
            greedy: greedy_pattern(&cfg.fingerprint)?,
            zone,
            time_format: cfg.time_format.clone(),
        })
    }

    /// Override the display zone (tests pin this to UTC).
    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    /// Extract sorted records, discarding diagnostics.
    pub fn extract(&self, entries: &[CoalescedEntry]) -> Vec<RedemptionRecord> {
        self.extract_with_report(entries).records
    }

    pub fn extract_with_report(&self, entries: &[CoalescedEntry]) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        for (index, entry) in entries.iter().enumerate() {
            if !entry.message.contains(&self.marker) {
                report.unmarked += 1;
                continue;
            }
            match self.extract_one(&entry.message) {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    match &reason {
                        SkipReason::InvalidPayload(err) => tracing::warn!(
                            index,
                            timestamp = %entry.timestamp,
                            error = %err,
                            "failed to parse redemption payload"
                        ),
                        SkipReason::NoPayload => tracing::debug!(
                            index,
                            timestamp = %entry.timestamp,
                            "marker present but no payload found"
                        ),
                    }
                    report.skipped.push(SkippedEntry {
                        index,
                        timestamp: entry.timestamp.clone(),
                        reason,
                    });
                }
            }
        }

        report
            .records
            .sort_by(|a, b| a.redeemed_at.cmp(&b.redeemed_at));

        tracing::info!(
            entries = entries.len(),
            records = report.records.len(),
            skipped = report.skipped.len(),
            "extracted redemptions"
        );
        report
    }

    fn extract_one(&self, message: &str) -> Result<RedemptionRecord, SkipReason> {
        let span = self.locate_payload(message).ok_or(SkipReason::NoPayload)?;
        let payload: Payload = serde_json::from_str(span)
            .map_err(|e| SkipReason::InvalidPayload(e.to_string()))?;
        Ok(self.map_payload(payload))
    }

    /// Find the embedded payload span inside `message`.
    ///
    /// The earliest-starting brace-balanced object that contains the
    /// fingerprint wins; without one, the greedy `{ … fingerprint … }` span is
    /// returned so truncated payloads still reach the parser.
    pub fn locate_payload<'a>(&self, message: &'a str) -> Option<&'a str> {
        if let Some((start, end)) = balanced_payload_span(message, &self.fingerprint) {
            return Some(&message[start..end]);
        }
        self.greedy.find(message).map(|m| m.as_str())
    }

    fn map_payload(&self, payload: Payload) -> RedemptionRecord {
        let redeemed_at = match payload.redeemed_at {
            None => String::new(),
            Some(raw) => match parse_instant(&raw) {
                None => {
                    tracing::debug!(redeemed_at = %raw, "unparseable redeemed_at");
                    String::new()
                }
                Some(instant) => {
                    format_instant(instant, self.zone, &self.time_format).unwrap_or(raw)
                }
            },
        };

        RedemptionRecord {
            redeemed_at,
            user_id: payload.user_id.unwrap_or_default(),
            user_login: payload.user_login.unwrap_or_default(),
            user_name: payload.user_name.unwrap_or_default(),
            reward_title: payload
                .reward
                .and_then(|r| r.title)
                .unwrap_or_default(),
        }
    }
}

/// Extract with the built-in marker, fingerprint and local display zone.
pub fn extract(entries: &[CoalescedEntry]) -> Vec<RedemptionRecord> {
    Extractor::default().extract(entries)
}

fn greedy_pattern(fingerprint: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?s)\{{.*{}.*\}}", regex::escape(fingerprint)))
}

/// Byte range of the earliest-starting brace-balanced object in `message`
/// that contains `fingerprint`.
///
/// One pass over the bytes with a stack of open-brace offsets; every object is
/// checked against the fingerprint positions when it closes. Quotes only open
/// string literals inside an object, so stray quotes in surrounding prose do
/// not hide the payload.
fn balanced_payload_span(message: &str, fingerprint: &str) -> Option<(usize, usize)> {
    let hits: Vec<usize> = message.match_indices(fingerprint).map(|(i, _)| i).collect();
    if hits.is_empty() {
        return None;
    }
    let contains_fingerprint = |start: usize, end: usize| {
        let first = hits.partition_point(|&p| p < start);
        hits.get(first).is_some_and(|&p| p + fingerprint.len() <= end)
    };

    let mut open: Vec<usize> = Vec::new();
    let mut best: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in message.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                let Some(start) = open.pop() else { continue };
                let end = i + 1;
                if contains_fingerprint(start, end) && best.map_or(true, |(s, _)| start < s) {
                    best = Some((start, end));
                }
                // Nothing opened later can start before a closed top-level object.
                if open.is_empty() && best.is_some() {
                    return best;
                }
            }
            _ => {}
        }
    }
    best
}
