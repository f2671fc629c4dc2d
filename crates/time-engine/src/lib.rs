//! # time-engine
//!
//! Deterministic time computation for agent tools.
//!
//! Resolves timezone names and timestamp strings into instants, renders
//! instants in a handful of fixed formats, and computes signed durations
//! with a days/hours/minutes/seconds breakdown. Every function is pure
//! apart from the injected [`Clock`], so concurrent callers share nothing.
//!
//! ## Modules
//!
//! - [`resolver`] — timezone lookup, "now" resolution, multi-pattern timestamp parsing
//! - [`duration`] — signed difference between two instants and its breakdown
//! - [`render`] — instant formats and human-readable duration phrases
//! - [`clock`] — system and fixed wall-clock sources
//! - [`error`] — Error types

pub mod clock;
pub mod duration;
pub mod error;
pub mod render;
pub mod resolver;

pub use clock::{Clock, FixedClock, SystemClock};
pub use duration::{decompose, difference, Direction, DurationBreakdown, TimeDifference};
pub use error::TimeError;
pub use render::{
    group_thousands, render_breakdown, render_instant, render_magnitude, render_offset,
    FormatSpec,
};
pub use resolver::{accepted_patterns, parse, parse_timezone, resolve_current, Instant};
