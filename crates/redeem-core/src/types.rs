//! Core types for redeem-core.
//!
//! This module defines the data structures that flow through the pipeline:
//! the [`RawLogEntry`] read from the export document, the intermediate
//! [`CoalescedEntry`], and the final [`RedemptionRecord`].

use serde::{Deserialize, Serialize};

/// One element of the exported log document.
///
/// Extra keys on the input objects (level, source, ...) are ignored. A
/// `message` that is absent or `null` deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLogEntry {
    /// Timestamp string as written by the logger (ISO-8601).
    pub timestamp: String,
    /// Free-form message text.
    #[serde(default)]
    pub message: Option<String>,
}

impl RawLogEntry {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: Some(message.into()),
        }
    }
}

/// A group of adjacent raw entries that the logger split out of one emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalescedEntry {
    /// Timestamp of the first raw entry in the group.
    pub timestamp: String,
    /// Messages of every grouped entry, newline-joined in input order.
    pub message: String,
}

/// A normalised reward redemption.
///
/// Serializes with the camelCase keys used by the export formats, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRecord {
    /// `YYYY-MM-DD HH:MM:SS` in the display zone, or empty when the payload
    /// carried no usable `redeemed_at`.
    pub redeemed_at: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    /// Empty when the payload has no `reward.title`.
    pub reward_title: String,
}

impl RedemptionRecord {
    /// Display name for the redeeming user.
    ///
    /// The login is appended in parentheses only when it differs from the
    /// display name by more than letter case.
    pub fn redeemer(&self) -> String {
        if self.user_name.to_lowercase() == self.user_login.to_lowercase() {
            self.user_name.clone()
        } else {
            format!("{} ({})", self.user_name, self.user_login)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, login: &str) -> RedemptionRecord {
        RedemptionRecord {
            redeemed_at: String::new(),
            user_id: "1".to_string(),
            user_login: login.to_string(),
            user_name: name.to_string(),
            reward_title: String::new(),
        }
    }

    #[test]
    fn redeemer_hides_login_differing_only_by_case() {
        assert_eq!(record("Alice", "alice").redeemer(), "Alice");
    }

    #[test]
    fn redeemer_appends_distinct_login() {
        assert_eq!(record("ありす", "alice").redeemer(), "ありす (alice)");
    }

    #[test]
    fn raw_entry_accepts_null_and_missing_message() {
        let entries: Vec<RawLogEntry> = serde_json::from_str(
            r#"[{"timestamp":"2024-01-01T00:00:00Z","message":null},
                {"timestamp":"2024-01-01T00:00:01Z","level":"info"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].message, None);
        assert_eq!(entries[1].message, None);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&record("A", "a")).unwrap();
        assert_eq!(
            json,
            r#"{"redeemedAt":"","userId":"1","userLogin":"a","userName":"A","rewardTitle":""}"#
        );
    }
}
