//! Recurring-date expression resolver.
//!
//! Turns human-friendly phrases such as `everyday 09:00`, `every monday 18:00`,
//! `1st 08:00` or `*-*-15 12:00` into concrete timestamps relative to a
//! wall-clock reference. Recognised keywords at the start of the expression
//! are rewritten into today's `YYYY-MM-DD`, in a fixed priority order, and the
//! result must then parse as `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD HH:MM`.
//!
//! A keyword that names a different weekday or day-of-month than the
//! reference is never rewritten, so `monday 09:00` only resolves on Mondays.
//!
//! ```ignore
//! let clock = WallClock::now();
//! if let Some(ts) = recurrence::resolve("every thursday 14:30", &clock) {
//!     // seconds since the epoch, local time zone
//! }
//! ```

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike};

/// Canonical output format of a resolved expression.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted when the seconds are omitted; they default to `00`.
const SHORT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Abbreviated and full names, indexed by weekday (0 = Monday).
const WEEKDAY_ALIASES: [[&str; 2]; 7] = [
    ["mon", "monday"],
    ["tue", "tuesday"],
    ["wed", "wednesday"],
    ["thu", "thursday"],
    ["fri", "friday"],
    ["sat", "saturday"],
    ["sun", "sunday"],
];

const DAY_SUFFIXES: [&str; 5] = ["", "st", "nd", "rd", "th"];

/// Snapshot of the current local time, split into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: u8,
}

impl WallClock {
    /// Current local wall-clock time.
    pub fn now() -> Self {
        Self::from_naive(&Local::now().naive_local())
    }

    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            weekday: dt.weekday().num_days_from_monday() as u8,
        }
    }

    /// Wall-clock fields of `dt` as seen in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive(&dt.naive_local())
    }

    fn year_str(&self) -> String {
        format!("{:04}", self.year)
    }

    fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    fn day_str(&self) -> String {
        format!("{:02}", self.day)
    }

    /// `YYYY-MM-DD` of the reference day.
    pub fn date_string(&self) -> String {
        format!("{}-{}-{}", self.year_str(), self.month_str(), self.day_str())
    }
}

/// Every keyword tried against the expression, in priority order.
fn keywords(clock: &WallClock) -> Vec<String> {
    let mut out: Vec<String> = vec!["everyday".into(), "daily".into()];

    let aliases = WEEKDAY_ALIASES[usize::from(clock.weekday % 7)];
    for alias in aliases {
        for prefix in ["", "every "] {
            out.push(format!("{prefix}{alias}"));
        }
    }

    let day = clock.day.to_string();
    for suffix in DAY_SUFFIXES {
        out.push(format!("{day}{suffix}"));
    }

    let (y, m, d) = (clock.year_str(), clock.month_str(), clock.day_str());
    out.extend([
        "*-*-*".to_string(),
        format!("*-*-{d}"),
        format!("*-{m}-*"),
        format!("*-{m}-{d}"),
        format!("{y}-*-{d}"),
        format!("{y}-{m}-*"),
        format!("{y}-{m}-{d}"),
    ]);
    out
}

/// Rewrite `keyword` at the start of `expression` into `date`.
///
/// Case-insensitive; the keyword must end at whitespace or at the end of the
/// expression. Anything after the keyword is kept verbatim.
fn substitute(expression: String, keyword: &str, date: &str) -> String {
    let matched = expression
        .get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
    if !matched {
        return expression;
    }
    let rest = &expression[keyword.len()..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return expression;
    }
    format!("{date}{rest}")
}

/// Resolve to a local wall-clock date-time, or `None` when unresolvable.
pub fn resolve_naive(expression: &str, clock: &WallClock) -> Option<NaiveDateTime> {
    let date = clock.date_string();
    let expanded = keywords(clock)
        .iter()
        .fold(expression.trim().to_string(), |acc, keyword| {
            substitute(acc, keyword, &date)
        });

    NaiveDateTime::parse_from_str(&expanded, CANONICAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&expanded, SHORT_FORMAT))
        .ok()
}

/// Resolve to the canonical `YYYY-MM-DD HH:MM:SS` string.
pub fn complete(expression: &str, clock: &WallClock) -> Option<String> {
    resolve_naive(expression, clock).map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}

/// Resolve in the given time zone.
///
/// Ambiguous local times (DST fold) take the earliest instant; local times
/// that do not exist (DST gap) are unresolvable.
pub fn resolve_in<Tz: TimeZone>(
    expression: &str,
    clock: &WallClock,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let naive = resolve_naive(expression, clock)?;
    tz.from_local_datetime(&naive).earliest()
}

/// Resolve to a POSIX timestamp (seconds) in the local time zone.
pub fn resolve(expression: &str, clock: &WallClock) -> Option<i64> {
    resolve_in(expression, clock, &Local).map(|dt| dt.timestamp())
}

/// Format a local timestamp back into the canonical form.
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}
