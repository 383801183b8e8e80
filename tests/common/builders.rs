//! Test builders — ergonomic constructors for log entries and redemption
//! payloads.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use redeem_core::{extract::MARKER, RawLogEntry};

// ---------------------------------------------------------------------------
// RedemptionEventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for the JSON payload the overlay bot logs on a redemption.
///
/// # Example
///
/// ```rust
/// let payload = RedemptionEventBuilder::new("alice")
///     .redeemed_at("2024-01-15T10:00:00Z")
///     .reward("Dailyおみくじ")
///     .payload();
/// ```
pub struct RedemptionEventBuilder {
    user_id: String,
    user_login: String,
    user_name: String,
    redeemed_at: Option<String>,
    reward_title: Option<String>,
}

impl RedemptionEventBuilder {
    pub fn new(login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            user_id: format!("{}", login.len() * 1000 + 7),
            user_name: login.clone(),
            user_login: login,
            redeemed_at: Some("2024-01-15T10:00:00Z".to_string()),
            reward_title: Some("Dailyおみくじ".to_string()),
        }
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = id.into();
        self
    }

    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    pub fn redeemed_at(mut self, ts: impl Into<String>) -> Self {
        self.redeemed_at = Some(ts.into());
        self
    }

    pub fn reward(mut self, title: impl Into<String>) -> Self {
        self.reward_title = Some(title.into());
        self
    }

    pub fn no_reward(mut self) -> Self {
        self.reward_title = None;
        self
    }

    /// The payload as compact JSON text.
    pub fn payload(&self) -> String {
        let mut obj = serde_json::json!({
            "id": "c2a7f0d4-0000-4000-8000-000000000000",
            "broadcaster_user_id": "12345",
            "broadcaster_user_login": "streamer",
            "user_id": self.user_id,
            "user_login": self.user_login,
            "user_name": self.user_name,
            "user_input": "",
            "status": "unfulfilled",
        });
        if let Some(ts) = &self.redeemed_at {
            obj["redeemed_at"] = ts.clone().into();
        }
        if let Some(title) = &self.reward_title {
            obj["reward"] = serde_json::json!({ "id": "r-1", "title": title, "cost": 100 });
        }
        obj.to_string()
    }

    /// A single log message carrying marker and payload.
    pub fn message(&self) -> String {
        format!("[EventSub] {MARKER}: {}", self.payload())
    }

    /// One raw entry with the whole event.
    pub fn entry(&self, ts: &str) -> RawLogEntry {
        RawLogEntry::new(ts, self.message())
    }

    /// The event split into marker and payload entries, the way the logger
    /// fragments it, with the second entry `jitter_ms` after the first.
    pub fn split_entries(&self, ts: &str, jitter_ms: i64) -> Vec<RawLogEntry> {
        let first = chrono::DateTime::parse_from_rfc3339(ts).expect("rfc3339 test timestamp");
        let second = first + chrono::Duration::milliseconds(jitter_ms);
        vec![
            RawLogEntry::new(ts, format!("[EventSub] {MARKER}")),
            RawLogEntry::new(
                second.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                self.payload(),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

pub fn raw(ts: &str, message: &str) -> RawLogEntry {
    RawLogEntry::new(ts, message)
}

/// An entry with no `message` key at all.
pub fn silent(ts: &str) -> RawLogEntry {
    RawLogEntry {
        timestamp: ts.to_string(),
        message: None,
    }
}

/// Serialize entries back into the export document shape.
pub fn document(entries: &[RawLogEntry]) -> String {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| match &e.message {
            Some(m) => serde_json::json!({ "timestamp": e.timestamp, "level": "info", "message": m }),
            None => serde_json::json!({ "timestamp": e.timestamp, "level": "info" }),
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}
