// Property tests for the display-text parsers.

use chrono::{Duration, Local, TimeZone};
use proptest::prelude::*;

use home_dashboard::services::parse::{parse_bin_date, parse_clock_time, parse_fixture_time};
use home_dashboard::utils::date::start_of_day;

proptest! {
    /// A rolled clock time is always strictly in the future and never more
    /// than 24 hours away, whatever the time of day it is parsed at.
    #[test]
    fn rolled_clock_time_is_always_within_the_next_day(
        hours in 0u32..24,
        minutes in 0u32..60,
        now_offset_secs in 0i64..86_400,
    ) {
        let midnight = Local.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        let now = midnight + Duration::seconds(now_offset_secs);
        let text = format!("{:02}:{:02}", hours, minutes);

        let parsed = parse_clock_time(&text, true, now).unwrap();
        prop_assert!(parsed > now);
        prop_assert!(parsed - now <= Duration::hours(24));
    }

    /// Without rollover the parsed time always lands on today's date.
    #[test]
    fn unrolled_clock_time_lands_on_today(
        hours in 0u32..24,
        minutes in 0u32..60,
    ) {
        let now = Local.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let text = format!("{:02}:{:02}", hours, minutes);

        let parsed = parse_clock_time(&text, false, now).unwrap();
        prop_assert_eq!(parsed.date_naive(), now.date_naive());
    }

    /// The fixture parser never panics, whatever the display text contains.
    #[test]
    fn fixture_parser_is_total(text in ".*") {
        let _ = parse_fixture_time(&text);
    }

    /// Every parsed bin date carries the end-of-day sentinel.
    #[test]
    fn bin_dates_normalize_to_end_of_day(
        year in 2020i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let text = format!("{}/{}/{}", day, month, year);
        let parsed = parse_bin_date(&text).unwrap();
        let since_midnight = parsed - start_of_day(parsed);
        prop_assert_eq!(since_midnight.num_milliseconds(), 86_399_999);
    }
}
