//! Signed elapsed time between two instants.
//!
//! [`difference`] resolves both endpoints through the resolver and
//! returns a [`TimeDifference`]: the two instants plus a
//! [`DurationBreakdown`] of `end - start`. The breakdown stores the signed
//! total and a magnitude split into days, hours, minutes and seconds;
//! phrasing the direction is left to the renderer.

use serde::Serialize;

use crate::clock::Clock;
use crate::error::{Result, TimeError};
use crate::resolver::{self, Instant};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Which endpoint is later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// End is after start.
    Later,
    /// End is before start.
    Earlier,
    /// Both endpoints fall on the same second.
    SameInstant,
}

impl Direction {
    pub fn from_total_seconds(total_seconds: i64) -> Self {
        match total_seconds.signum() {
            1 => Direction::Later,
            -1 => Direction::Earlier,
            _ => Direction::SameInstant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Later => "later",
            Direction::Earlier => "earlier",
            Direction::SameInstant => "same instant",
        }
    }
}

/// Elapsed time decomposed greatest-unit-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    /// Signed total (negative if end is before start).
    pub total_seconds: i64,
    /// Whole days of the magnitude; unbounded.
    pub days: u64,
    /// Hours component (0-23).
    pub hours: u64,
    /// Minutes component (0-59).
    pub minutes: u64,
    /// Seconds component (0-59).
    pub seconds: u64,
}

impl DurationBreakdown {
    /// Break a signed second count into its magnitude components.
    pub fn from_total_seconds(total_seconds: i64) -> Self {
        let (days, hours, minutes, seconds) = decompose(total_seconds.unsigned_abs());
        Self {
            total_seconds,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Breakdown of `end - start` at whole-second resolution.
    pub fn between(start: &Instant, end: &Instant) -> Self {
        Self::from_total_seconds(end.timestamp() - start.timestamp())
    }

    pub fn direction(&self) -> Direction {
        Direction::from_total_seconds(self.total_seconds)
    }

    /// Absolute number of seconds.
    pub fn magnitude(&self) -> u64 {
        self.total_seconds.unsigned_abs()
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds == 0
    }
}

/// Split `seconds` into (days, hours, minutes, seconds), truncating.
pub fn decompose(seconds: u64) -> (u64, u64, u64, u64) {
    let days = seconds / SECONDS_PER_DAY;
    let remainder = seconds % SECONDS_PER_DAY;
    let hours = remainder / SECONDS_PER_HOUR;
    let remainder = remainder % SECONDS_PER_HOUR;
    let minutes = remainder / SECONDS_PER_MINUTE;
    let seconds = remainder % SECONDS_PER_MINUTE;
    (days, hours, minutes, seconds)
}

/// Both resolved endpoints and the breakdown between them.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDifference {
    pub start: Instant,
    pub end: Instant,
    pub breakdown: DurationBreakdown,
}

/// Compute `end - start` for two textual timestamps in `timezone`.
///
/// `start_text` is required. An empty `end_text` means "now" according
/// to `clock`. Resolution errors are returned as-is.
///
/// # Errors
///
/// [`TimeError::MissingStart`] for an empty start, otherwise whatever
/// [`resolver::parse`] or [`resolver::resolve_current`] reports.
///
/// # Examples
///
/// ```
/// use time_engine::clock::SystemClock;
/// use time_engine::duration::{difference, Direction};
///
/// let diff = difference("2025-09-09 10:00:00", "2025-09-09 14:30:00", "UTC", &SystemClock).unwrap();
/// assert_eq!(diff.breakdown.total_seconds, 16_200);
/// assert_eq!(diff.breakdown.hours, 4);
/// assert_eq!(diff.breakdown.minutes, 30);
/// assert_eq!(diff.breakdown.direction(), Direction::Later);
/// ```
pub fn difference(
    start_text: &str,
    end_text: &str,
    timezone: &str,
    clock: &dyn Clock,
) -> Result<TimeDifference> {
    if start_text.trim().is_empty() {
        return Err(TimeError::MissingStart);
    }
    let start = resolver::parse(start_text, timezone)?;

    let end = if end_text.trim().is_empty() {
        resolver::resolve_current(timezone, clock)?
    } else {
        resolver::parse(end_text, timezone)?
    };

    let breakdown = DurationBreakdown::between(&start, &end);

    Ok(TimeDifference {
        start,
        end,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 9, 9, 23, 56, 34).unwrap())
    }

    #[test]
    fn test_decompose_mixed() {
        assert_eq!(decompose(16_200), (0, 4, 30, 0));
        assert_eq!(decompose(230_400), (2, 16, 0, 0));
        assert_eq!(decompose(90_061), (1, 1, 1, 1));
    }

    #[test]
    fn test_decompose_zero() {
        assert_eq!(decompose(0), (0, 0, 0, 0));
    }

    #[test]
    fn test_decompose_days_unbounded() {
        let (days, hours, minutes, seconds) = decompose(400 * 86_400 + 59);
        assert_eq!(days, 400);
        assert_eq!((hours, minutes, seconds), (0, 0, 59));
    }

    #[test]
    fn test_difference_same_day() {
        let diff = difference("2025-09-09 10:00:00", "2025-09-09 14:30:00", "UTC", &clock())
            .unwrap();
        let b = diff.breakdown;
        assert_eq!(b.total_seconds, 16_200);
        assert_eq!((b.days, b.hours, b.minutes, b.seconds), (0, 4, 30, 0));
        assert_eq!(b.direction(), Direction::Later);
    }

    #[test]
    fn test_difference_negative_day() {
        let diff = difference("2025-09-10 00:00:00", "2025-09-09 00:00:00", "UTC", &clock())
            .unwrap();
        let b = diff.breakdown;
        assert_eq!(b.total_seconds, -86_400);
        assert_eq!((b.days, b.hours, b.minutes, b.seconds), (1, 0, 0, 0));
        assert_eq!(b.direction(), Direction::Earlier);
        assert_eq!(b.magnitude(), 86_400);
    }

    #[test]
    fn test_difference_same_instant() {
        let diff = difference("2025-09-09 10:00:00", "2025-09-09 10:00:00", "UTC", &clock())
            .unwrap();
        assert!(diff.breakdown.is_zero());
        assert_eq!(diff.breakdown.direction(), Direction::SameInstant);
        assert_eq!(diff.breakdown.days, 0);
        assert_eq!(diff.breakdown.seconds, 0);
    }

    #[test]
    fn test_difference_empty_end_is_now() {
        let diff = difference("2025-09-09 22:56:34", "", "UTC", &clock()).unwrap();
        assert_eq!(diff.end.timestamp(), 1_757_462_194);
        assert_eq!(diff.breakdown.total_seconds, 3_600);
        assert_eq!(diff.breakdown.hours, 1);
    }

    #[test]
    fn test_difference_blank_end_is_now() {
        let diff = difference("2025-09-09", "   ", "UTC", &clock()).unwrap();
        assert_eq!(diff.end.timestamp(), 1_757_462_194);
    }

    #[test]
    fn test_difference_missing_start() {
        let err = difference("", "2025-09-09 00:00:00", "UTC", &clock()).unwrap_err();
        assert_eq!(err, TimeError::MissingStart);
    }

    #[test]
    fn test_difference_bad_start_propagates() {
        let err = difference("invalid-date", "", "UTC", &clock()).unwrap_err();
        assert!(matches!(
            err,
            TimeError::UnparsableTimestamp { ref raw, .. } if raw == "invalid-date"
        ));
    }

    #[test]
    fn test_difference_bad_end_propagates() {
        let err = difference("2025-09-09", "tomorrow", "UTC", &clock()).unwrap_err();
        assert!(matches!(
            err,
            TimeError::UnparsableTimestamp { ref raw, .. } if raw == "tomorrow"
        ));
    }

    #[test]
    fn test_difference_unknown_timezone() {
        let err = difference(
            "2025-09-09 10:00:00",
            "2025-09-09 14:30:00",
            "Invalid/Timezone",
            &clock(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TimeError::UnknownTimezone("Invalid/Timezone".to_string())
        );
    }

    #[test]
    fn test_difference_across_dst_counts_real_seconds() {
        // New York loses an hour overnight on March 8, 2026
        let diff = difference(
            "2026-03-08 00:00:00",
            "2026-03-09 00:00:00",
            "America/New_York",
            &clock(),
        )
        .unwrap();
        assert_eq!(diff.breakdown.total_seconds, 23 * 3_600);
        assert_eq!(diff.breakdown.days, 0);
        assert_eq!(diff.breakdown.hours, 23);
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::from_total_seconds(5).label(), "later");
        assert_eq!(Direction::from_total_seconds(-5).label(), "earlier");
        assert_eq!(Direction::from_total_seconds(0).label(), "same instant");
    }

    #[test]
    fn test_breakdown_json_shape() {
        let b = DurationBreakdown::from_total_seconds(-90_061);
        assert_eq!(
            serde_json::to_value(b).unwrap(),
            serde_json::json!({
                "total_seconds": -90_061,
                "days": 1,
                "hours": 1,
                "minutes": 1,
                "seconds": 1
            })
        );
    }

    #[test]
    fn test_direction_json_is_snake_case() {
        assert_eq!(serde_json::to_value(Direction::Later).unwrap(), "later");
        assert_eq!(serde_json::to_value(Direction::Earlier).unwrap(), "earlier");
        assert_eq!(
            serde_json::to_value(Direction::SameInstant).unwrap(),
            "same_instant"
        );
    }
}
