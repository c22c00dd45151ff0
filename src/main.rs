// Home Dashboard
// Demo binary: drives the board over a static sample feed once per second.

mod models;
mod services;
mod utils;

use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local};

use models::entry::{BinFeedItem, Category, EntryId, FeedItem, StyleState};
use services::board::debug::log_snapshot;
use services::board::{BoardError, BoardFeed, BoardRenderer, BoardService};
use services::config::load_config;
use utils::date::clock_label;

struct StaticFeed {
    transit: Vec<FeedItem>,
    fixtures: Vec<FeedItem>,
    bins: Vec<BinFeedItem>,
}

impl StaticFeed {
    /// Sample entries spread around startup time so every label has
    /// something to count down to.
    fn sample() -> Self {
        let now = Local::now();
        let departure = |minutes: i64| (now + ChronoDuration::minutes(minutes)).format("%H:%M");
        let kickoff = now + ChronoDuration::days(1) + ChronoDuration::hours(2);

        Self {
            transit: vec![
                FeedItem::new(1, format!("{} to Cathedral", departure(6))),
                FeedItem::new(2, format!("{} to Cathedral", departure(18))),
                FeedItem::new(3, format!("{} to Cathedral", departure(31))),
            ],
            fixtures: vec![FeedItem::new(
                4,
                format!(
                    "Wednesday v Rovers - {} at {}",
                    kickoff.format("%d/%m/%Y"),
                    kickoff.format("%H:%M")
                ),
            )],
            bins: vec![
                BinFeedItem::new(
                    5,
                    (now + ChronoDuration::days(1)).format("%d/%m/%Y").to_string(),
                    "General Waste",
                ),
                BinFeedItem::new(
                    6,
                    (now + ChronoDuration::days(8)).format("%Y-%m-%d").to_string(),
                    "Paper & Card",
                ),
            ],
        }
    }
}

impl BoardFeed for StaticFeed {
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

/// Prints each label line when it changes; styles and removals go to the log.
#[derive(Default)]
struct ConsoleRenderer {
    last_labels: HashMap<Category, String>,
}

impl BoardRenderer for ConsoleRenderer {
    fn set_label(&mut self, category: Category, text: &str) -> Result<(), BoardError> {
        let changed = self
            .last_labels
            .get(&category)
            .is_none_or(|previous| previous != text);
        if changed {
            println!("[{}] {:>8}: {}", clock_label(Local::now()), category.as_str(), text);
            self.last_labels.insert(category, text.to_string());
        }
        Ok(())
    }

    fn set_style(&mut self, id: EntryId, style: StyleState) {
        if style != StyleState::None {
            log::debug!("item {:?} styled {:?}", id, style);
        }
    }

    fn remove_item(&mut self, id: EntryId) {
        log::info!("item {:?} swiped away", id);
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Home Dashboard");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("board.json"));
    let config = load_config(&config_path)?;

    let feed = StaticFeed::sample();
    let mut renderer = ConsoleRenderer::default();
    let mut board = BoardService::new(config);
    board.add_observer(log_snapshot);
    let interval = Duration::from_secs(board.config().tick_interval_secs.max(1));

    // Page-scoped widget semantics: run until the process is killed.
    loop {
        let result = board.tick(&feed, &mut renderer);
        for (category, err) in &result.failed_categories {
            log::warn!("{} update skipped: {}", category.as_str(), err);
        }
        thread::sleep(interval);
    }
}
