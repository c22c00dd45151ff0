//! Per-entry temporal classification.
//!
//! Transit and fixture entries are judged at minute granularity, bins at
//! day granularity. Expired entries are always scheduled for removal.

use chrono::{DateTime, Duration, Local};

use crate::models::config::BoardConfig;
use crate::models::entry::{Classification, EntryState, StyleState};
use crate::utils::date::{is_same_day, start_of_day};

/// Time bands around a fixture's kickoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureWindows {
    pub pre_kickoff: Duration,
    pub ongoing: Duration,
    pub finishing: Duration,
}

impl FixtureWindows {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            pre_kickoff: Duration::minutes(config.fixture_pre_kickoff_minutes),
            ongoing: Duration::minutes(config.fixture_ongoing_minutes),
            finishing: Duration::minutes(config.fixture_finishing_minutes),
        }
    }

    pub fn window_start(&self, kickoff: DateTime<Local>) -> DateTime<Local> {
        kickoff - self.pre_kickoff
    }

    pub fn ongoing_end(&self, kickoff: DateTime<Local>) -> DateTime<Local> {
        kickoff + self.ongoing
    }

    pub fn finishing_end(&self, kickoff: DateTime<Local>) -> DateTime<Local> {
        kickoff + self.finishing
    }
}

impl Default for FixtureWindows {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

/// Classify a transit departure. The timestamp is expected to already be
/// rollover-adjusted, so anything at or before now has genuinely passed.
pub fn classify_transit(
    departure: DateTime<Local>,
    now: DateTime<Local>,
    imminent_lead_minutes: i64,
) -> Classification {
    if departure <= now {
        return Classification::expired();
    }

    let minutes_until = (departure - now).num_minutes();
    if minutes_until <= imminent_lead_minutes {
        Classification::keep(EntryState::Imminent)
    } else {
        Classification::keep(EntryState::Upcoming)
    }
}

pub fn transit_style(classification: Classification) -> StyleState {
    match classification.state {
        EntryState::Imminent => StyleState::Imminent,
        _ => StyleState::None,
    }
}

/// Classify a fixture against its kickoff windows.
pub fn classify_fixture(
    kickoff: DateTime<Local>,
    now: DateTime<Local>,
    windows: &FixtureWindows,
) -> Classification {
    let ongoing_end = windows.ongoing_end(kickoff);
    let finishing_end = windows.finishing_end(kickoff);

    if now > finishing_end {
        return Classification::expired();
    }
    if now >= ongoing_end {
        return Classification::keep(EntryState::Finishing);
    }
    if now >= kickoff {
        return Classification::keep(EntryState::Ongoing);
    }
    if is_same_day(kickoff, now) {
        Classification::keep(EntryState::Imminent)
    } else {
        Classification::keep(EntryState::Upcoming)
    }
}

/// Style for a fixture item. The alert band runs from one hour before
/// kickoff through the end of the finishing window, wider than the
/// ongoing/finishing label states, and outranks the same-day imminent
/// highlight.
pub fn fixture_style(
    kickoff: DateTime<Local>,
    now: DateTime<Local>,
    windows: &FixtureWindows,
) -> StyleState {
    let in_alert_band =
        now >= windows.window_start(kickoff) && now <= windows.finishing_end(kickoff);
    if in_alert_band {
        StyleState::Alert
    } else if is_same_day(kickoff, now) {
        StyleState::Imminent
    } else {
        StyleState::None
    }
}

/// Classify a bin collection by calendar day. The date carries the
/// end-of-day sentinel, so it only precedes today's midnight once the
/// collection day is strictly in the past.
pub fn classify_bin(date: DateTime<Local>, now: DateTime<Local>) -> Classification {
    if date < start_of_day(now) {
        Classification::expired()
    } else {
        Classification::keep(EntryState::Upcoming)
    }
}

/// Highlight for the next bin entry: today or tomorrow only. Entries
/// further out stay unhighlighted even while they are the "next" item.
pub fn bin_highlight(date: DateTime<Local>, now: DateTime<Local>) -> StyleState {
    let start_of_today = start_of_day(now);
    let start_of_day_after_tomorrow = start_of_today + Duration::days(2);
    if date >= start_of_today && date < start_of_day_after_tomorrow {
        StyleState::Imminent
    } else {
        StyleState::None
    }
}
