//! Static log documents used across harnesses.

/// A realistic export: chatter, one whole event, one event split across two
/// entries 1 ms apart, one event with a broken payload, and one redemption of
/// a different reward. Events are logged out of redemption order.
pub const EXPORT_MIXED: &str = r#"[
  {"timestamp":"2024-01-15T10:00:00.000Z","level":"info","message":"Connected to EventSub websocket"},
  {"timestamp":"2024-01-15T10:00:05.000Z","level":"info","message":"[EventSub] REWARD REDEMPTION EVENT RECEIVED: {\"broadcaster_user_id\":\"12345\",\"redeemed_at\":\"2024-01-15T10:00:04.900Z\",\"user_id\":\"2001\",\"user_login\":\"bob\",\"user_name\":\"Bob\",\"reward\":{\"title\":\"Dailyおみくじ\"}}"},
  {"timestamp":"2024-01-15T10:01:00.231Z","level":"info","message":"[EventSub] REWARD REDEMPTION EVENT RECEIVED"},
  {"timestamp":"2024-01-15T10:01:00.232Z","level":"info","message":"{\"broadcaster_user_id\":\"12345\",\"redeemed_at\":\"2024-01-15T09:59:00Z\",\"user_id\":\"2002\",\"user_login\":\"alice\",\"user_name\":\"ありす\",\"reward\":{\"title\":\"Dailyおみくじ\"}}"},
  {"timestamp":"2024-01-15T10:02:00.000Z","level":"warn","message":"[EventSub] REWARD REDEMPTION EVENT RECEIVED: {\"broadcaster_user_id\":\"12345\",\"user_id\":"},
  {"timestamp":"2024-01-15T10:03:00.000Z","level":"info","message":"[EventSub] REWARD REDEMPTION EVENT RECEIVED: {\"broadcaster_user_id\":\"12345\",\"redeemed_at\":\"2024-01-15T10:02:59Z\",\"user_id\":\"2003\",\"user_login\":\"carol\",\"user_name\":\"carol\",\"reward\":{\"title\":\"Hydrate\"}}"},
  {"timestamp":"2024-01-15T10:04:00.000Z","level":"info"}
]"#;
