//! Time helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp in milliseconds as an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒のタイムスタンプが RFC 3339 形式に変換される
        // given (前提条件):
        let millis = 1_672_498_800_123i64;

        // when (操作):
        let formatted = timestamp_to_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(formatted, "2022-12-31T15:00:00.123Z");
    }

    #[test]
    fn test_now_millis_is_after_2024() {
        // テスト項目: 現在時刻が妥当な範囲にある
        // then (期待する結果):
        assert!(now_millis() > 1_704_067_200_000);
    }
}
