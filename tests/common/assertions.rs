//! Domain-specific assertions for redeem harnesses.

use redeem_core::RedemptionRecord;

/// Assert that records are in ascending `redeemed_at` order.
pub fn assert_sorted(records: &[RedemptionRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].redeemed_at <= pair[1].redeemed_at,
            "records out of order:\n  {:?}\n  {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert the sequence of `user_login` values.
#[macro_export]
macro_rules! assert_logins {
    ($records:expr, [$($login:expr),* $(,)?]) => {{
        let records: &[redeem_core::RedemptionRecord] = &$records;
        let actual: Vec<&str> = records.iter().map(|r| r.user_login.as_str()).collect();
        let expected: Vec<&str> = vec![$($login),*];
        pretty_assertions::assert_eq!(actual, expected, "unexpected user_login sequence");
    }};
}
