// Date utility functions

use chrono::{DateTime, Local, NaiveDate, TimeZone};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

pub fn start_of_day(date: DateTime<Local>) -> DateTime<Local> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(date.timezone())
        .unwrap()
}

/// End-of-day sentinel: 23:59:59.999 local. Bin dates are normalized to
/// this instant so same-day comparisons against now stay true until midnight.
pub fn end_of_day(date: DateTime<Local>) -> DateTime<Local> {
    date.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
        .and_local_timezone(date.timezone())
        .unwrap()
}

/// Local midnight of an arbitrary calendar date. `None` when the local
/// timezone has no representation for that instant.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
}

/// Clock display string, e.g. "09:41:07".
pub fn clock_label(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}
