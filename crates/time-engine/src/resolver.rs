//! Timezone lookup and timestamp resolution.
//!
//! Two entry points produce an [`Instant`]:
//!
//! - [`resolve_current`] — the present instant, localized to a named zone
//! - [`parse`] — a textual timestamp, localized to a named zone
//!
//! Parsing walks a fixed, ordered list of accepted patterns and takes the
//! first that matches. Anything outside that list is rejected rather than
//! guessed at: `09/10/2025` could be September or October, so it fails.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset,
    SubsecRound, TimeZone, Timelike,
};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::error::{Result, TimeError};

/// An absolute point in time carrying the zone it was resolved in.
///
/// Always whole-second precision: sub-second parts are dropped on
/// construction.
pub type Instant = DateTime<Tz>;

/// Years that render as plain four digits and therefore parse back.
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Length of `±HH:MM:SS`.
const OFFSET_WITH_SECONDS_LEN: usize = 9;

/// chrono encodes a leap second as a nanosecond count at or above this.
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// One accepted input layout and the function that recognises it.
struct Pattern {
    label: &'static str,
    parse: fn(&str, &Tz) -> Option<Instant>,
}

/// Accepted layouts, most specific first.
const PATTERNS: &[Pattern] = &[
    Pattern {
        label: "YYYY-MM-DDTHH:MM:SS±HH:MM",
        parse: parse_rfc3339,
    },
    Pattern {
        label: "YYYY-MM-DDTHH:MM:SS±HH:MM:SS",
        parse: parse_offset_with_seconds,
    },
    Pattern {
        label: "YYYY-MM-DD HH:MM:SS",
        parse: parse_date_time_seconds,
    },
    Pattern {
        label: "YYYY-MM-DDTHH:MM:SS",
        parse: parse_date_t_time_seconds,
    },
    Pattern {
        label: "YYYY-MM-DD HH:MM",
        parse: parse_date_time_minutes,
    },
    Pattern {
        label: "YYYY-MM-DD",
        parse: parse_date_only,
    },
];

/// Labels of the accepted layouts, in the order they are tried.
pub fn accepted_patterns() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.label).collect()
}

/// Look up an IANA timezone identifier.
///
/// Matching is exact and case-sensitive: `"utc"` is not `"UTC"`.
///
/// # Errors
///
/// Returns [`TimeError::UnknownTimezone`] carrying the identifier as given.
pub fn parse_timezone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(id.to_string()))
}

/// The present instant according to `clock`, expressed in `timezone`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use time_engine::clock::FixedClock;
/// use time_engine::resolver::resolve_current;
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2025, 9, 9, 23, 56, 34).unwrap());
/// let now = resolve_current("America/Sao_Paulo", &clock).unwrap();
/// assert_eq!(now.to_rfc3339(), "2025-09-09T20:56:34-03:00");
/// ```
pub fn resolve_current(timezone: &str, clock: &dyn Clock) -> Result<Instant> {
    let tz = parse_timezone(timezone)?;
    Ok(clock.now().trunc_subsecs(0).with_timezone(&tz))
}

/// Parse `text` into an instant in `timezone`.
///
/// Offset-aware input (RFC 3339) keeps its instant and is re-expressed in
/// the zone. Naive input is read as wall-clock time in the zone; a date
/// without a time means midnight. Leap seconds (`:60`) and instants whose
/// local year falls outside 0000-9999 are rejected.
///
/// # Errors
///
/// Returns [`TimeError::UnknownTimezone`] if the zone does not exist, or
/// [`TimeError::UnparsableTimestamp`] with the raw text and every pattern
/// tried if nothing matched.
pub fn parse(text: &str, timezone: &str) -> Result<Instant> {
    let tz = parse_timezone(timezone)?;
    let trimmed = text.trim();

    PATTERNS
        .iter()
        .find_map(|pattern| (pattern.parse)(trimmed, &tz).filter(in_year_range))
        .ok_or_else(|| TimeError::UnparsableTimestamp {
            raw: text.to_string(),
            tried: accepted_patterns(),
        })
}

// ── Pattern parsers ─────────────────────────────────────────────────────────

fn in_year_range(instant: &Instant) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&instant.year())
}

fn parse_rfc3339(s: &str, tz: &Tz) -> Option<Instant> {
    DateTime::parse_from_rfc3339(s).ok().and_then(|dt| fixed_to_zone(dt, tz))
}

/// RFC 3339 layout with a seconds-precision offset, as historical
/// local-mean-time offsets need (`+05:21:10`). chrono's parser stops at
/// offset minutes, so the offset is split off and read here.
fn parse_offset_with_seconds(s: &str, tz: &Tz) -> Option<Instant> {
    let split = s.len().checked_sub(OFFSET_WITH_SECONDS_LEN)?;
    let naive = NaiveDateTime::parse_from_str(s.get(..split)?, "%Y-%m-%dT%H:%M:%S").ok()?;
    let offset = parse_offset_seconds(s.get(split..)?)?;
    fixed_to_zone(offset.from_local_datetime(&naive).single()?, tz)
}

/// `±HH:MM:SS` as a fixed offset.
fn parse_offset_seconds(text: &str) -> Option<FixedOffset> {
    let sign = match text.get(..1)? {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    let fields: Vec<i32> = text[1..].split(':').map(two_digits).collect::<Option<_>>()?;
    let [hours, minutes, seconds] = fields[..] else {
        return None;
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60 + seconds))
}

fn two_digits(field: &str) -> Option<i32> {
    if field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}

fn fixed_to_zone(dt: DateTime<FixedOffset>, tz: &Tz) -> Option<Instant> {
    if dt.nanosecond() >= NANOS_PER_SECOND {
        return None;
    }
    Some(dt.with_timezone(tz).trunc_subsecs(0))
}

fn parse_date_time_seconds(s: &str, tz: &Tz) -> Option<Instant> {
    parse_naive(s, "%Y-%m-%d %H:%M:%S", tz)
}

fn parse_date_t_time_seconds(s: &str, tz: &Tz) -> Option<Instant> {
    parse_naive(s, "%Y-%m-%dT%H:%M:%S", tz)
}

fn parse_date_time_minutes(s: &str, tz: &Tz) -> Option<Instant> {
    parse_naive(s, "%Y-%m-%d %H:%M", tz)
}

fn parse_date_only(s: &str, tz: &Tz) -> Option<Instant> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

fn parse_naive(s: &str, layout: &str, tz: &Tz) -> Option<Instant> {
    let naive = NaiveDateTime::parse_from_str(s, layout).ok()?;
    if naive.nanosecond() >= NANOS_PER_SECOND {
        return None;
    }
    localize(naive, tz)
}

/// Attach `tz` to a wall-clock time.
///
/// Fall-back overlaps pick the earlier instant. Spring-forward gaps use the
/// offset in force before the gap, which moves the wall time forward by the
/// gap length (02:30 in a one-hour gap reads as 03:30).
fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<Instant> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before_gap = naive.checked_sub_signed(Duration::days(1))?;
            let offset = tz.offset_from_local_datetime(&before_gap).earliest()?.fix();
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
