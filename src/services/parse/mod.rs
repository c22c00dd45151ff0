//! Text-to-time parsing for the three dashboard categories.
//!
//! Display text is trusted but not guaranteed well-formed: every parser
//! returns `None` on malformed input and callers skip the entry silently.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Local, NaiveDate};
use regex::Regex;

use crate::models::entry::BinType;
use crate::utils::date::{end_of_day, local_midnight, start_of_day};

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(\D|$)").expect("valid clock regex"));

static FIXTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4}) at (\d{1,2}):(\d{2})").expect("valid fixture regex")
});

static BIN_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("valid bin date regex"));

static BIN_ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("valid iso date regex"));

/// Parse an "HH:MM" prefix into today's date at that time.
///
/// When `roll_if_past` is set and the result is at or before `now`, the
/// time is advanced by exactly one day: a departure board showing 00:10
/// after midnight means tomorrow, and no service list spans further ahead
/// than that.
///
/// Hours and minutes are not range-checked, so "25:70" rolls over via
/// calendar arithmetic to 02:10 the next day.
pub fn parse_clock_time(
    text: &str,
    roll_if_past: bool,
    now: DateTime<Local>,
) -> Option<DateTime<Local>> {
    let caps = CLOCK_RE.captures(text.trim())?;
    let hours: i64 = caps[1].parse().ok()?;
    let minutes: i64 = caps[2].parse().ok()?;

    let target = start_of_day(now) + Duration::hours(hours) + Duration::minutes(minutes);
    if roll_if_past && target <= now {
        return Some(target + Duration::days(1));
    }
    Some(target)
}

/// Parse a fixture's kickoff from "D/M/YYYY at H:MM" anywhere in the text.
/// Fixture dates are absolute (they carry a year), so there is no rollover.
pub fn parse_fixture_time(text: &str) -> Option<DateTime<Local>> {
    let caps = FIXTURE_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let hours: i64 = caps[4].parse().ok()?;
    let minutes: i64 = caps[5].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(local_midnight(date)? + Duration::hours(hours) + Duration::minutes(minutes))
}

/// Parse a bin collection date from "D/M/YYYY" or "YYYY-M-D" anywhere in
/// the text, normalized to the 23:59:59.999 end-of-day sentinel so the
/// entry stays current until local midnight passes.
pub fn parse_bin_date(text: &str) -> Option<DateTime<Local>> {
    let date = if let Some(caps) = BIN_SLASH_RE.captures(text) {
        NaiveDate::from_ymd_opt(caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)?
    } else if let Some(caps) = BIN_ISO_RE.captures(text) {
        NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)?
    } else {
        return None;
    };

    Some(end_of_day(local_midnight(date)?))
}

/// Map a bin badge to its service type. The upstream page names services by
/// bin colour or contents; anything unrecognized is skipped.
pub fn parse_bin_badge(text: &str) -> Option<BinType> {
    let low = text.to_lowercase();
    if low.contains("black") || low.contains("residual") || low.contains("general") {
        Some(BinType::General)
    } else if low.contains("blue") || low.contains("paper") || low.contains("card") {
        Some(BinType::Paper)
    } else if low.contains("brown") || low.contains("glass") || low.contains("cans") {
        Some(BinType::Glass)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, h, m, 0).unwrap()
    }

    #[test]
    fn clock_time_builds_today() {
        let now = at(9, 0);
        let parsed = parse_clock_time("09:05", true, now).unwrap();
        assert_eq!(parsed, at(9, 5));
    }

    #[test]
    fn clock_time_rolls_on_equality_or_past() {
        // 09:05 with now = 09:06 -> tomorrow 09:05, 24h minus one minute away.
        let now = at(9, 6);
        let parsed = parse_clock_time("09:05", true, now).unwrap();
        assert_eq!(parsed - now, Duration::hours(24) - Duration::minutes(1));

        // Equality also rolls.
        let parsed = parse_clock_time("09:06", true, now).unwrap();
        assert_eq!(parsed, at(9, 6) + Duration::days(1));
    }

    #[test]
    fn clock_time_without_rollover_stays_in_the_past() {
        let now = at(9, 6);
        let parsed = parse_clock_time("09:05", false, now).unwrap();
        assert_eq!(parsed, at(9, 5));
    }

    #[test_case("09:05 to Cathedral", 9, 5 ; "trailing route text")]
    #[test_case("  7:30", 7, 30 ; "leading whitespace and single digit hour")]
    #[test_case("23:59", 23, 59 ; "end of day")]
    fn clock_time_accepts(text: &str, h: u32, m: u32) {
        let now = at(0, 0);
        assert_eq!(parse_clock_time(text, false, now).unwrap(), at(h, m));
    }

    #[test_case("" ; "empty")]
    #[test_case("late" ; "no digits")]
    #[test_case("0905" ; "no separator")]
    #[test_case("9:5" ; "single digit minute")]
    #[test_case("due 09:05" ; "time not at prefix")]
    fn clock_time_rejects(text: &str) {
        assert_eq!(parse_clock_time(text, true, at(12, 0)), None);
    }

    #[test]
    fn clock_time_out_of_range_rolls_via_calendar_arithmetic() {
        // "25:70" is permitted: midnight + 25h + 70min = 02:10 next day.
        let now = at(12, 0);
        let parsed = parse_clock_time("25:70", false, now).unwrap();
        assert_eq!(
            parsed,
            Local.with_ymd_and_hms(2025, 3, 15, 2, 10, 0).unwrap()
        );
    }

    #[test]
    fn fixture_time_matches_anywhere_in_text() {
        let parsed = parse_fixture_time("Match at 14/03/2025 at 19:45").unwrap();
        assert_eq!(parsed, Local.with_ymd_and_hms(2025, 3, 14, 19, 45, 0).unwrap());
    }

    #[test]
    fn fixture_time_tolerates_single_digit_fields() {
        let parsed = parse_fixture_time("Owls v Blades — 5/4/2025 at 3:00").unwrap();
        assert_eq!(parsed, Local.with_ymd_and_hms(2025, 4, 5, 3, 0, 0).unwrap());
    }

    #[test_case("no date here" ; "absent pattern")]
    #[test_case("14/03/2025 19:45" ; "missing at keyword")]
    #[test_case("14/03/25 at 19:45" ; "two digit year")]
    #[test_case("31/02/2025 at 19:45" ; "invalid calendar date")]
    fn fixture_time_rejects(text: &str) {
        assert_eq!(parse_fixture_time(text), None);
    }

    #[test]
    fn bin_date_slash_format_normalizes_to_end_of_day() {
        let parsed = parse_bin_date("Collection: 05/01/2025 - General").unwrap();
        let expected = Local
            .with_ymd_and_hms(2025, 1, 5, 23, 59, 59)
            .unwrap()
            + Duration::milliseconds(999);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn bin_date_iso_format_matches_slash_format() {
        let slash = parse_bin_date("05/01/2025").unwrap();
        let iso = parse_bin_date("2025-01-05").unwrap();
        assert_eq!(slash, iso);
    }

    #[test]
    fn bin_date_prefers_slash_format() {
        // Both formats present: the D/M/YYYY match wins.
        let parsed = parse_bin_date("05/01/2025 (2025-02-06)").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test_case("" ; "empty")]
    #[test_case("next week" ; "no date")]
    #[test_case("30/02/2025" ; "invalid calendar date")]
    fn bin_date_rejects(text: &str) {
        assert_eq!(parse_bin_date(text), None);
    }

    #[test_case("General Waste", Some(BinType::General))]
    #[test_case("Black Bin", Some(BinType::General))]
    #[test_case("Paper & Card", Some(BinType::Paper))]
    #[test_case("Blue Bin", Some(BinType::Paper))]
    #[test_case("Glass / Cans", Some(BinType::Glass))]
    #[test_case("Brown Bin", Some(BinType::Glass))]
    #[test_case("Garden", None)]
    fn bin_badge_mapping(text: &str, expected: Option<BinType>) {
        assert_eq!(parse_bin_badge(text), expected);
    }
}
