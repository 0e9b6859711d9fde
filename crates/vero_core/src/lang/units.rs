//! Time and calendar units.
//!
//! [`TimeUnit`] qualifies `WAIT <n> ...`; [`DateUnit`] qualifies `ADD`/`SUBTRACT` date arithmetic.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::units::{self, DateUnit, TimeUnit};
//!
//! assert_eq!(units::time_unit("ms"), Some(TimeUnit::Milliseconds));
//! assert_eq!(units::date_unit("days"), Some(DateUnit::Day));
//! assert_eq!(units::date_unit("DAY"), Some(DateUnit::Day));
//! ```

use serde::Serialize;

use super::registry::{LangItemInfo, item_with_aliases, lookup};

/// Unit for `WAIT` durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
}

/// Unit for date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Registry of wait units.
pub const TIME_UNITS: &[LangItemInfo<TimeUnit>] = &[
    item_with_aliases(
        TimeUnit::Milliseconds,
        "MILLISECONDS",
        &["MILLISECOND", "MS"],
        "Duration in milliseconds.",
    ),
    item_with_aliases(TimeUnit::Seconds, "SECONDS", &["SECOND", "SEC", "S"], "Duration in seconds."),
];

/// Registry of date arithmetic units.
pub const DATE_UNITS: &[LangItemInfo<DateUnit>] = &[
    item_with_aliases(DateUnit::Second, "SECONDS", &["SECOND"], "Calendar seconds."),
    item_with_aliases(DateUnit::Minute, "MINUTES", &["MINUTE"], "Calendar minutes."),
    item_with_aliases(DateUnit::Hour, "HOURS", &["HOUR"], "Calendar hours."),
    item_with_aliases(DateUnit::Day, "DAYS", &["DAY"], "Calendar days."),
    item_with_aliases(DateUnit::Week, "WEEKS", &["WEEK"], "Calendar weeks."),
    item_with_aliases(DateUnit::Month, "MONTHS", &["MONTH"], "Calendar months."),
    item_with_aliases(DateUnit::Year, "YEARS", &["YEAR"], "Calendar years."),
];

/// Resolve a `WAIT` unit.
pub fn time_unit(spelling: &str) -> Option<TimeUnit> {
    lookup(TIME_UNITS, spelling)
}

/// Resolve a date arithmetic unit.
pub fn date_unit(spelling: &str) -> Option<DateUnit> {
    lookup(DATE_UNITS, spelling)
}
