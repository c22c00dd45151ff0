//! Next-item selection and countdown label rendering.

use chrono::{DateTime, Duration, Local};

use crate::models::entry::{DatedEvent, TransitMode};
use crate::services::classify::FixtureWindows;
use crate::utils::date::start_of_day;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Soonest departure strictly after now among rollover-adjusted times.
pub fn next_transit(departures: &[DateTime<Local>], now: DateTime<Local>) -> Option<DateTime<Local>> {
    departures.iter().copied().filter(|t| *t > now).min()
}

/// The fixture the countdown should talk about.
///
/// Two-phase preference: a fixture whose ongoing-or-finishing span
/// currently contains now wins over any future fixture, so a match that
/// kicked off an hour ago is still "the" match even when another one is
/// chronologically next. Only if nothing is in progress does the first
/// strictly-future fixture qualify.
pub fn relevant_fixture(
    kickoffs: &[DateTime<Local>],
    now: DateTime<Local>,
    windows: &FixtureWindows,
) -> Option<DateTime<Local>> {
    let mut sorted = kickoffs.to_vec();
    sorted.sort();

    sorted
        .iter()
        .copied()
        .find(|f| *f <= now && now < windows.finishing_end(*f))
        .or_else(|| sorted.iter().copied().find(|f| *f > now))
}

/// Next bin collection: minimum-date entry among those not yet in the past.
pub fn next_bin<'a>(bins: &'a [DatedEvent], now: DateTime<Local>) -> Option<&'a DatedEvent> {
    let start_of_today = start_of_day(now);
    bins.iter()
        .filter(|b| b.timestamp >= start_of_today)
        .min_by_key(|b| b.timestamp)
}

/// "Next tram in: 4m 32s" / "No upcoming trams".
pub fn transit_label(
    next: Option<DateTime<Local>>,
    now: DateTime<Local>,
    mode: TransitMode,
) -> String {
    match next {
        Some(next) => {
            let diff = (next - now).max(Duration::zero());
            let minutes = diff.num_minutes();
            let seconds = diff.num_seconds() % 60;
            format!("Next {} in: {}m {}s", mode.noun(), minutes, seconds)
        }
        None => format!("No upcoming {}", mode.plural()),
    }
}

/// Countdown or status text for the relevant fixture.
pub fn fixture_label(
    relevant: Option<DateTime<Local>>,
    now: DateTime<Local>,
    windows: &FixtureWindows,
) -> String {
    let Some(kickoff) = relevant else {
        return "No ongoing match".to_string();
    };

    let ongoing_end = windows.ongoing_end(kickoff);
    let finishing_end = windows.finishing_end(kickoff);

    if now >= kickoff && now < ongoing_end {
        let remaining = ongoing_end - now;
        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;
        format!("Match ongoing — {}h {}m left", hours, minutes)
    } else if now >= ongoing_end && now < finishing_end {
        // Whole minutes, rounded up, so the label never shows "0m left"
        // while the window is still open.
        let remaining = finishing_end - now;
        let minutes = (remaining.num_seconds() + 59) / 60;
        format!("Match finishing — {}m left", minutes)
    } else if now >= finishing_end {
        "No ongoing match".to_string()
    } else {
        let diff = kickoff - now;
        let days = diff.num_days();
        let hours = diff.num_hours() % 24;
        let minutes = diff.num_minutes() % 60;
        format!("Next match in: {}d {}h {}m", days, hours, minutes)
    }
}

/// "Next bin: Today" / "Next bin: Tomorrow" / "Next bin: N days" /
/// "No upcoming bin collections".
pub fn bin_label(next: Option<&DatedEvent>, now: DateTime<Local>) -> String {
    let Some(next) = next else {
        return "No upcoming bin collections".to_string();
    };

    let start_of_today = start_of_day(now);
    let start_of_tomorrow = start_of_today + Duration::days(1);
    let start_of_day_after = start_of_today + Duration::days(2);

    let label = if next.timestamp >= start_of_today && next.timestamp < start_of_tomorrow {
        "Today".to_string()
    } else if next.timestamp >= start_of_tomorrow && next.timestamp < start_of_day_after {
        "Tomorrow".to_string()
    } else {
        let diff_ms = (next.timestamp - start_of_today).num_milliseconds();
        let days = (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
        format!("{} days", days)
    };

    format!("Next bin: {}", label)
}
