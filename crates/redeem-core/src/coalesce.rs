//! Entry coalescer — merges adjacent raw entries that one emission was split
//! into by the upstream logger.
//!
//! A group is anchored at its first entry's timestamp. Later entries join the
//! group while `|t - anchor| <= tolerance`; the anchor never slides, so a run
//! of drifting timestamps cannot grow one group without bound.
//!
//! An entry whose timestamp cannot be parsed is infinitely far from every
//! anchor: it closes the open group and starts its own, which no later entry
//! can join.

use crate::{
    timestamp::parse_instant,
    types::{CoalescedEntry, RawLogEntry},
};
use chrono::{DateTime, Duration, Utc};

/// Default merge window.
pub const DEFAULT_TOLERANCE_MS: i64 = 100;

/// Coalesce with the default 100 ms tolerance.
pub fn coalesce(entries: &[RawLogEntry]) -> Vec<CoalescedEntry> {
    coalesce_with(entries, Duration::milliseconds(DEFAULT_TOLERANCE_MS))
}

/// Coalesce with an explicit tolerance (inclusive).
pub fn coalesce_with(entries: &[RawLogEntry], tolerance: Duration) -> Vec<CoalescedEntry> {
    let mut out = Vec::with_capacity(entries.len());
    let mut current: Option<Group> = None;

    for (index, entry) in entries.iter().enumerate() {
        let instant = parse_instant(&entry.timestamp);
        if instant.is_none() {
            tracing::warn!(
                index,
                timestamp = %entry.timestamp,
                "unparseable log timestamp; starting a new group"
            );
        }
        let text = entry.message.as_deref().unwrap_or("");

        match current.as_mut() {
            Some(group) if group.accepts(instant, tolerance) => {
                group.entry.message.push('\n');
                group.entry.message.push_str(text);
            }
            _ => {
                if let Some(done) = current.take() {
                    out.push(done.entry);
                }
                current = Some(Group {
                    anchor: instant,
                    entry: CoalescedEntry {
                        timestamp: entry.timestamp.clone(),
                        message: text.to_string(),
                    },
                });
            }
        }
    }

    if let Some(done) = current {
        out.push(done.entry);
    }

    tracing::debug!(raw = entries.len(), coalesced = out.len(), "coalesced log entries");
    out
}

struct Group {
    /// `None` when the first entry's timestamp was unparseable.
    anchor: Option<DateTime<Utc>>,
    entry: CoalescedEntry,
}

impl Group {
    fn accepts(&self, instant: Option<DateTime<Utc>>, tolerance: Duration) -> bool {
        match (self.anchor, instant) {
            (Some(anchor), Some(t)) => (t - anchor).abs() <= tolerance,
            _ => false,
        }
    }
}
