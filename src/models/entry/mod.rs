use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Which dashboard list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Transit,
    Fixture,
    BinCollection,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transit => "transit",
            Category::Fixture => "fixture",
            Category::BinCollection => "bin",
        }
    }
}

/// Transit flavour shown in the countdown label ("Next tram in" vs "Next bus in").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitMode {
    Tram,
    Bus,
}

impl Default for TransitMode {
    fn default() -> Self {
        Self::Tram
    }
}

impl TransitMode {
    pub fn noun(&self) -> &'static str {
        match self {
            TransitMode::Tram => "tram",
            TransitMode::Bus => "bus",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            TransitMode::Tram => "trams",
            TransitMode::Bus => "buses",
        }
    }
}

/// Bin service type shown on the item badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinType {
    General,
    Paper,
    Glass,
}

/// Stable identifier for a displayed list item. Assigned by the feed and
/// reused across ticks so removal and styling can target the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// Raw display text for one transit or fixture list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: EntryId,
    pub text: String,
}

impl FeedItem {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            text: text.into(),
        }
    }
}

/// Raw display text for one bin list item. Date and badge are separate
/// fields on the rendered item, so the feed carries them separately too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinFeedItem {
    pub id: EntryId,
    pub date_text: String,
    pub badge_text: String,
}

impl BinFeedItem {
    pub fn new(id: u64, date_text: impl Into<String>, badge_text: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            date_text: date_text.into(),
            badge_text: badge_text.into(),
        }
    }
}

/// A successfully parsed list item. Lives for one reconciliation cycle;
/// rebuilt from display text on every tick, never cached across ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedEvent {
    pub id: EntryId,
    pub timestamp: DateTime<Local>,
    pub category: Category,
    pub source_text: String,
    /// Badge type for bin entries; `None` for other categories or when the
    /// badge text names an unknown service.
    pub bin_type: Option<BinType>,
}

/// Temporal state of an entry relative to now.
///
/// `Ongoing` and `Finishing` apply only to fixtures; transit and bin
/// entries go straight from `Upcoming`/`Imminent` to `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Upcoming,
    Imminent,
    Ongoing,
    Finishing,
    Expired,
}

/// Result of classifying one entry. Pure function of (event, now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub state: EntryState,
    pub remove_now: bool,
}

impl Classification {
    pub fn keep(state: EntryState) -> Self {
        Self {
            state,
            remove_now: false,
        }
    }

    pub fn expired() -> Self {
        Self {
            state: EntryState::Expired,
            remove_now: true,
        }
    }
}

/// Visual emphasis applied to a list item. `Alert` outranks `Imminent`
/// when a fixture qualifies for both on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleState {
    None,
    Imminent,
    Alert,
}

impl Default for StyleState {
    fn default() -> Self {
        Self::None
    }
}
