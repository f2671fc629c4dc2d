//! Text rendering for instants and duration breakdowns.
//!
//! Rendering never fails: an unrecognised format name falls back to
//! [`FormatSpec::Iso`].

use chrono::{Offset, SecondsFormat};

use crate::duration::{Direction, DurationBreakdown};
use crate::resolver::Instant;

/// `YYYY-MM-DD HH:MM:SS TZ`, used by [`FormatSpec::Custom`].
pub const CUSTOM_PATTERN: &str = "%Y-%m-%d %H:%M:%S %Z";

const READABLE_PATTERN: &str = "%A, %B %d, %Y at %I:%M:%S %p %Z";

/// RFC 3339 layout with the offset carried to the second.
const ISO_SECONDS_OFFSET_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%::z";

/// How to render an [`Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSpec {
    /// RFC 3339 with UTC offset: `2025-09-09T20:56:34-03:00`. Historical
    /// local-mean-time offsets keep their seconds: `1900-01-01T00:00:00+05:21:10`.
    #[default]
    Iso,
    /// Long form: `Tuesday, September 09, 2025 at 11:56:34 PM UTC`.
    Readable,
    /// Seconds since the Unix epoch.
    Timestamp,
    /// `2025-09-09 23:56:34 UTC`.
    Custom,
}

impl FormatSpec {
    /// Map a format name to a mode. Unknown names yield `Iso`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "readable" => FormatSpec::Readable,
            "timestamp" => FormatSpec::Timestamp,
            "custom" => FormatSpec::Custom,
            _ => FormatSpec::Iso,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatSpec::Iso => "iso",
            FormatSpec::Readable => "readable",
            FormatSpec::Timestamp => "timestamp",
            FormatSpec::Custom => "custom",
        }
    }
}

pub fn render_instant(instant: &Instant, format: FormatSpec) -> String {
    match format {
        FormatSpec::Iso => render_iso(instant),
        FormatSpec::Readable => instant.format(READABLE_PATTERN).to_string(),
        FormatSpec::Timestamp => instant.timestamp().to_string(),
        FormatSpec::Custom => instant.format(CUSTOM_PATTERN).to_string(),
    }
}

fn render_iso(instant: &Instant) -> String {
    if instant.offset().fix().local_minus_utc() % 60 == 0 {
        instant.to_rfc3339_opts(SecondsFormat::Secs, false)
    } else {
        instant.format(ISO_SECONDS_OFFSET_PATTERN).to_string()
    }
}

/// UTC offset in `±HHMM` form, e.g. `+0000` or `-0300`.
pub fn render_offset(instant: &Instant) -> String {
    instant.format("%z").to_string()
}

/// Magnitude phrase followed by the direction, e.g. `4 hours, 30 minutes (later)`.
pub fn render_breakdown(breakdown: &DurationBreakdown, direction: Direction) -> String {
    format!("{} ({})", render_magnitude(breakdown), direction.label())
}

/// Non-zero components, largest first, joined with `", "`.
///
/// A zero breakdown reads `less than a second`.
pub fn render_magnitude(breakdown: &DurationBreakdown) -> String {
    let parts: Vec<String> = [
        (breakdown.days, "day"),
        (breakdown.hours, "hour"),
        (breakdown.minutes, "minute"),
        (breakdown.seconds, "second"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, unit)| pluralize(n, unit))
    .collect();

    if parts.is_empty() {
        "less than a second".to_string()
    } else {
        parts.join(", ")
    }
}

/// Insert `,` between groups of three digits: `16200` → `16,200`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn pluralize(n: u64, unit: &str) -> String {
    format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" })
}
