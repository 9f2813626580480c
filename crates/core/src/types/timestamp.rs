//! Timestamp helpers shared by the client filters and receipt validation.

use chrono::{DateTime, Utc};

/// Unix timestamp of the store opening, 2025-01-15T00:00:00Z.
///
/// No genuine receipt can be older than this.
pub const STORE_OPENED_AT: i64 = 1_736_899_200;

/// The store opening as a `DateTime`.
#[must_use]
pub fn store_opened_at() -> DateTime<Utc> {
    DateTime::from_timestamp(STORE_OPENED_AT, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Format a timestamp the way Loyverse date filters expect it
/// (`2025-01-15T08:30:00.000Z`). Sub-second precision is dropped.
#[must_use]
pub fn format_api_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_store_opened_at() {
        assert_eq!(
            store_opened_at().to_rfc3339(),
            "2025-01-15T00:00:00+00:00"
        );
    }

    #[test]
    fn test_format_api_timestamp() {
        let at = Utc
            .with_ymd_and_hms(2025, 3, 7, 14, 5, 9)
            .single()
            .unwrap_or_default();
        assert_eq!(format_api_timestamp(&at), "2025-03-07T14:05:09.000Z");
    }
}
