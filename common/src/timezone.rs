// Display time-zone conversion helpers
//
// Storage and all eligibility comparisons are in UTC. Conversion to the
// site's display zone happens only here, at the logging/formatting
// boundary.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// The source system's display zone (+05:30).
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Convert a UTC instant into the display zone.
pub fn to_display(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// Format a UTC instant in the display zone, RFC 3339 with offset.
pub fn format_display(instant: DateTime<Utc>, tz: Tz) -> String {
    to_display(instant, tz).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_conversion_applies_offset() {
        let utc = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let local = to_display(utc, DEFAULT_DISPLAY_TZ);
        assert_eq!(local.to_rfc3339(), "2025-01-01T15:30:00+05:30");
    }

    #[test]
    fn test_display_conversion_preserves_instant() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 15, 23, 45, 0).unwrap();
        let local = to_display(utc, DEFAULT_DISPLAY_TZ);
        assert_eq!(local.with_timezone(&Utc), utc);
    }

    #[test]
    fn test_format_display_crosses_midnight() {
        // 20:00 UTC is 01:30 the next day in +05:30
        let utc = Utc.with_ymd_and_hms(2025, 3, 10, 20, 0, 0).unwrap();
        assert_eq!(format_display(utc, DEFAULT_DISPLAY_TZ), "2025-03-11T01:30:00+05:30");
    }
}
