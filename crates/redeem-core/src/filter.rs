//! Reward-title filter, applied by the caller at render/export time.

use crate::types::RedemptionRecord;

/// Keep records whose `reward_title` equals `title` exactly. `None` keeps
/// everything.
pub fn filter(records: &[RedemptionRecord], title: Option<&str>) -> Vec<RedemptionRecord> {
    match title {
        None => records.to_vec(),
        Some(title) => records
            .iter()
            .filter(|r| r.reward_title == title)
            .cloned()
            .collect(),
    }
}
