// Text reports for the two time tools
use time_engine::{
    difference, group_thousands, render_breakdown, render_instant,
    render_offset, resolve_current, Clock, FormatSpec, TimeError,
};
use tracing::debug;

use crate::tools::ToolText;

const SUGGESTED_TIMEZONES: &str =
    "UTC, America/New_York, America/Sao_Paulo, Europe/London, Asia/Tokyo";

/// The `get_current_datetime` tool.
pub fn get_current_datetime(timezone: &str, format: &str, clock: &dyn Clock) -> ToolText {
    let format = FormatSpec::from_name(format);
    debug!(timezone, format = format.name(), "resolving current datetime");

    match resolve_current(timezone, clock) {
        Ok(now) => ToolText::ok(format!(
            "🕐 Current DateTime\n\
             ==================\n\n\
             **Timezone:** {timezone}\n\
             **Format:** {}\n\
             **DateTime:** {}\n\
             **UTC Offset:** {}\n",
            format.name(),
            render_instant(&now, format),
            render_offset(&now),
        )),
        Err(err) => ToolText::error(render_error(&err, None)),
    }
}

/// The `calculate_time_difference` tool.
pub fn calculate_time_difference(
    start_time: &str,
    end_time: &str,
    timezone: &str,
    clock: &dyn Clock,
) -> ToolText {
    debug!(start_time, end_time, timezone, "calculating time difference");

    let diff = match difference(start_time, end_time, timezone, clock) {
        Ok(diff) => diff,
        Err(err) => return ToolText::error(render_error(&err, Some(start_time))),
    };
    let b = diff.breakdown;
    let magnitude = b.magnitude();

    ToolText::ok(format!(
        "⏱️ Time Difference Calculation\n\
         =============================\n\n\
         **From:** {}\n\
         **To:** {}\n\
         **Total Duration:** {} second{}\n\n\
         **Breakdown:**\n\
         - Days: {}\n\
         - Hours: {}\n\
         - Minutes: {}\n\
         - Seconds: {}\n\n\
         **Summary:** {}\n",
        render_instant(&diff.start, FormatSpec::Custom),
        render_instant(&diff.end, FormatSpec::Custom),
        group_thousands(magnitude),
        if magnitude == 1 { "" } else { "s" },
        b.days,
        b.hours,
        b.minutes,
        b.seconds,
        render_breakdown(&b, b.direction()),
    ))
}

/// One line naming the failure, one line suggesting a fix.
///
/// With `start_time` given, an unparsable timestamp is attributed to the
/// start or end argument; start is parsed first, so a match means start.
fn render_error(err: &TimeError, start_time: Option<&str>) -> String {
    let headline = match (err, start_time) {
        (TimeError::UnparsableTimestamp { raw, .. }, Some(start)) => {
            let argument = if raw == start { "start" } else { "end" };
            format!("Invalid {argument} datetime format: '{raw}'")
        }
        _ => err.to_string(),
    };
    let hint = match err {
        TimeError::UnknownTimezone(_) => format!("Try: {SUGGESTED_TIMEZONES}"),
        TimeError::UnparsableTimestamp { tried, .. } => format!("Use: {}", tried.join(" or ")),
        TimeError::MissingStart => {
            "Use: start_time as YYYY-MM-DD HH:MM:SS (end_time defaults to now)".to_string()
        }
    };
    format!("❌ {headline}\n💡 {hint}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use time_engine::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 9, 9, 23, 56, 34).unwrap())
    }

    fn datetime_line(text: &str) -> &str {
        text.lines()
            .find_map(|line| line.strip_prefix("**DateTime:** "))
            .unwrap()
    }

    // ── get_current_datetime ────────────────────────────────────────────

    #[test]
    fn test_current_utc_iso() {
        let result = get_current_datetime("UTC", "iso", &clock());
        assert!(!result.is_error);
        assert!(result.text.contains("Current DateTime"));
        assert!(result.text.contains("**Timezone:** UTC"));
        assert!(result.text.contains("**Format:** iso"));
        assert!(result.text.contains("**UTC Offset:** +0000"));
        assert_eq!(datetime_line(&result.text), "2025-09-09T23:56:34+00:00");
    }

    #[test]
    fn test_current_sao_paulo() {
        let result = get_current_datetime("America/Sao_Paulo", "iso", &clock());
        assert!(result.text.contains("**Timezone:** America/Sao_Paulo"));
        assert!(result.text.contains("-03:00"));
        assert!(result.text.contains("**UTC Offset:** -0300"));
    }

    #[test]
    fn test_current_readable() {
        let result = get_current_datetime("UTC", "readable", &clock());
        assert!(result.text.contains("**Format:** readable"));
        assert_eq!(
            datetime_line(&result.text),
            "Tuesday, September 09, 2025 at 11:56:34 PM UTC"
        );
    }

    #[test]
    fn test_current_timestamp() {
        let result = get_current_datetime("UTC", "timestamp", &clock());
        let value = datetime_line(&result.text);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(value, "1757462194");
    }

    #[test]
    fn test_current_custom() {
        let result = get_current_datetime("UTC", "custom", &clock());
        assert_eq!(datetime_line(&result.text), "2025-09-09 23:56:34 UTC");
    }

    #[test]
    fn test_current_unknown_format_is_iso() {
        let result = get_current_datetime("UTC", "fancy", &clock());
        assert!(!result.is_error);
        assert!(result.text.contains("**Format:** iso"));
        assert_eq!(datetime_line(&result.text), "2025-09-09T23:56:34+00:00");
    }

    #[test]
    fn test_current_unknown_timezone() {
        let result = get_current_datetime("Not/AZone", "iso", &clock());
        assert!(result.is_error);
        assert!(result.text.contains("❌ Unknown timezone"));
        assert!(result.text.contains("Not/AZone"));
        assert!(result.text.contains("💡 Try:"));
    }

    // ── calculate_time_difference ───────────────────────────────────────

    #[test]
    fn test_difference_specific_dates() {
        let result = calculate_time_difference(
            "2025-09-09 10:00:00",
            "2025-09-09 14:30:00",
            "UTC",
            &clock(),
        );
        assert!(!result.is_error);
        assert!(result.text.contains("Time Difference Calculation"));
        assert!(result.text.contains("**From:** 2025-09-09 10:00:00 UTC"));
        assert!(result.text.contains("**To:** 2025-09-09 14:30:00 UTC"));
        assert!(result.text.contains("**Total Duration:** 16,200 seconds"));
        assert!(result.text.contains("- Days: 0"));
        assert!(result.text.contains("- Hours: 4"));
        assert!(result.text.contains("- Minutes: 30"));
        assert!(result.text.contains("- Seconds: 0"));
        assert!(result.text.contains("**Summary:** 4 hours, 30 minutes (later)"));
    }

    #[test]
    fn test_difference_reversed() {
        let result = calculate_time_difference(
            "2025-09-09 14:30:00",
            "2025-09-09 10:00:00",
            "UTC",
            &clock(),
        );
        assert!(result.text.contains("**Total Duration:** 16,200 seconds"));
        assert!(result.text.contains("**Summary:** 4 hours, 30 minutes (earlier)"));
    }

    #[test]
    fn test_difference_one_day_back() {
        let result = calculate_time_difference(
            "2025-09-10 00:00:00",
            "2025-09-09 00:00:00",
            "UTC",
            &clock(),
        );
        assert!(result.text.contains("- Days: 1"));
        assert!(result.text.contains("**Summary:** 1 day (earlier)"));
    }

    #[test]
    fn test_difference_to_now() {
        let result = calculate_time_difference("2025-09-09 22:56:34", "", "UTC", &clock());
        assert!(result.text.contains("**To:** 2025-09-09 23:56:34 UTC"));
        assert!(result.text.contains("- Hours: 1"));
        assert!(result.text.contains("**Summary:** 1 hour (later)"));
    }

    #[test]
    fn test_difference_same_instant() {
        let result =
            calculate_time_difference("2025-09-09", "2025-09-09 00:00:00", "UTC", &clock());
        assert!(result.text.contains("**Total Duration:** 0 seconds"));
        assert!(result
            .text
            .contains("**Summary:** less than a second (same instant)"));
    }

    #[test]
    fn test_difference_single_second() {
        let result = calculate_time_difference(
            "2025-09-09 00:00:00",
            "2025-09-09 00:00:01",
            "UTC",
            &clock(),
        );
        assert!(result.text.contains("**Total Duration:** 1 second\n"));
    }

    #[test]
    fn test_difference_invalid_start() {
        let result = calculate_time_difference("invalid-date", "", "UTC", &clock());
        assert!(result.is_error);
        assert!(result
            .text
            .starts_with("❌ Invalid start datetime format: 'invalid-date'\n💡 Use: "));
        assert_eq!(result.text.matches("YYYY-MM-DD HH:MM:SS").count(), 1);
        assert_eq!(result.text.lines().count(), 2);
    }

    #[test]
    fn test_difference_invalid_end() {
        let result = calculate_time_difference("2025-09-09", "tomorrow", "UTC", &clock());
        assert!(result.is_error);
        assert!(result
            .text
            .starts_with("❌ Invalid end datetime format: 'tomorrow'\n"));
        assert!(result.text.contains("YYYY-MM-DD HH:MM:SS or YYYY-MM-DDTHH:MM:SS or"));
    }

    #[test]
    fn test_difference_both_invalid_blames_start() {
        let result = calculate_time_difference("soon", "soon", "UTC", &clock());
        assert!(result.text.starts_with("❌ Invalid start datetime format: 'soon'"));
    }

    #[test]
    fn test_difference_missing_start() {
        let result = calculate_time_difference("", "2025-09-09 00:00:00", "UTC", &clock());
        assert!(result.is_error);
        assert!(result.text.contains("❌ Missing start time"));
    }

    #[test]
    fn test_difference_invalid_timezone() {
        let result = calculate_time_difference(
            "2025-09-09 10:00:00",
            "2025-09-09 14:30:00",
            "Invalid/Timezone",
            &clock(),
        );
        assert!(result.is_error);
        assert!(result.text.contains("❌ Unknown timezone"));
        assert!(result.text.contains("Invalid/Timezone"));
    }
}
