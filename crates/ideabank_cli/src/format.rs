//! Display formatting helpers for console output.

use chrono::DateTime;

/// Renders an epoch-milliseconds timestamp as a UTC datetime string.
///
/// Falls back to the raw value when the timestamp is out of range.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{epoch_ms} ms"),
    }
}

#[cfg(test)]
mod tests {
    use super::epoch_ms_to_utc;

    #[test]
    fn formats_known_timestamp() {
        assert_eq!(epoch_ms_to_utc(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_value() {
        assert_eq!(epoch_ms_to_utc(i64::MAX), format!("{} ms", i64::MAX));
    }
}
