//! Calendar-week window selection.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Monday-through-Sunday window containing `reference`, with the end
/// clamped so it never runs past the reference date.
///
/// The search endpoint silently treats future end dates as "today", so
/// clamping here keeps the printed window honest about what was queried.
pub fn week_range(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
    let end = (start + Duration::days(6)).min(reference);
    (start, end)
}

/// The current week's window, per the local clock.
pub fn current_week_range() -> (NaiveDate, NaiveDate) {
    week_range(Local::now().date_naive())
}
