// Shared helpers for integration tests

use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone};

use home_dashboard::models::entry::{BinFeedItem, Category, EntryId, FeedItem, StyleState};
use home_dashboard::services::board::{BoardError, BoardFeed, BoardRenderer};

pub fn local_time(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// Display text in the fixture list's "teams - D/M/YYYY at H:MM" shape.
pub fn fixture_text(kickoff: DateTime<Local>) -> String {
    format!(
        "Wednesday v Rovers - {} at {}",
        kickoff.format("%d/%m/%Y"),
        kickoff.format("%H:%M")
    )
}

/// In-memory feed the tests mutate between ticks.
#[derive(Default)]
pub struct TestFeed {
    pub transit: Vec<FeedItem>,
    pub fixtures: Vec<FeedItem>,
    pub bins: Vec<BinFeedItem>,
}

impl BoardFeed for TestFeed {
    fn transit_items(&self) -> Vec<FeedItem> {
        self.transit.clone()
    }
    fn fixture_items(&self) -> Vec<FeedItem> {
        self.fixtures.clone()
    }
    fn bin_items(&self) -> Vec<BinFeedItem> {
        self.bins.clone()
    }
}

/// Recording renderer; categories listed in `missing` have no label target.
#[derive(Default)]
pub struct TestRenderer {
    pub labels: HashMap<Category, String>,
    pub styles: HashMap<EntryId, StyleState>,
    pub removals: Vec<EntryId>,
    pub missing: Vec<Category>,
}

impl BoardRenderer for TestRenderer {
    fn set_label(&mut self, category: Category, text: &str) -> Result<(), BoardError> {
        if self.missing.contains(&category) {
            return Err(BoardError::MissingTarget { category });
        }
        self.labels.insert(category, text.to_string());
        Ok(())
    }

    fn set_style(&mut self, id: EntryId, style: StyleState) {
        self.styles.insert(id, style);
    }

    fn remove_item(&mut self, id: EntryId) {
        self.removals.push(id);
    }
}
