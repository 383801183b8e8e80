//! redeem-export — output adapters for extracted redemption records.
//!
//! Every adapter takes the column layout from [`Column`] and the header text
//! from [`Labels`](redeem_core::config::Labels), so CSV, workbook and
//! terminal output always agree on ordering and naming.

pub mod csv;
pub mod table;
pub mod xlsx;

use redeem_core::{config::Labels, RedemptionRecord};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// One output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    RedeemedAt,
    UserId,
    UserLogin,
    UserName,
    RewardTitle,
    /// Display name with the login appended when it differs.
    Redeemer,
}

impl Column {
    /// Every record field, in record order.
    pub const RECORD: &'static [Column] = &[
        Column::RedeemedAt,
        Column::UserId,
        Column::UserLogin,
        Column::UserName,
        Column::RewardTitle,
    ];

    /// Single redeemer-name column.
    pub const REDEEMER: &'static [Column] = &[Column::Redeemer];

    pub fn label(self, labels: &Labels) -> &str {
        match self {
            Column::RedeemedAt => &labels.redeemed_at,
            Column::UserId => &labels.user_id,
            Column::UserLogin => &labels.user_login,
            Column::UserName => &labels.user_name,
            Column::RewardTitle => &labels.reward_title,
            Column::Redeemer => &labels.redeemer,
        }
    }

    pub fn value(self, record: &RedemptionRecord) -> Cow<'_, str> {
        match self {
            Column::RedeemedAt => Cow::Borrowed(&record.redeemed_at),
            Column::UserId => Cow::Borrowed(&record.user_id),
            Column::UserLogin => Cow::Borrowed(&record.user_login),
            Column::UserName => Cow::Borrowed(&record.user_name),
            Column::RewardTitle => Cow::Borrowed(&record.reward_title),
            Column::Redeemer => Cow::Owned(record.redeemer()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_records() -> Vec<RedemptionRecord> {
    vec![
        RedemptionRecord {
            redeemed_at: "2024-01-01 09:00:00".to_string(),
            user_id: "101".to_string(),
            user_login: "alice".to_string(),
            user_name: "Alice".to_string(),
            reward_title: "Dailyおみくじ".to_string(),
        },
        RedemptionRecord {
            redeemed_at: "2024-01-01 09:05:30".to_string(),
            user_id: "202".to_string(),
            user_login: "bob_k".to_string(),
            user_name: "ボブ".to_string(),
            reward_title: "Hydrate, please".to_string(),
        },
    ]
}
