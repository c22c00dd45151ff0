//! The reconciliation loop.
//!
//! Once per tick the board re-reads all display text, re-parses it, and
//! idempotently rewrites labels, item styles and removal triggers. Nothing
//! is cached between ticks except the set of items already mid-removal,
//! which debounces the removal side effect.

pub mod debug;

use std::collections::HashSet;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::config::BoardConfig;
use crate::models::entry::{
    BinFeedItem, Category, Classification, DatedEvent, EntryId, FeedItem, StyleState,
};
use crate::services::classify::{
    bin_highlight, classify_bin, classify_fixture, classify_transit, fixture_style, transit_style,
    FixtureWindows,
};
use crate::services::parse::{parse_bin_badge, parse_bin_date, parse_clock_time, parse_fixture_time};
use crate::services::select::{
    bin_label, fixture_label, next_bin, next_transit, relevant_fixture, transit_label,
};

use self::debug::{BinDebug, ParsedText, TickSnapshot};

/// Source of display text, one list per category.
pub trait BoardFeed {
    fn transit_items(&self) -> Vec<FeedItem>;
    fn fixture_items(&self) -> Vec<FeedItem>;
    fn bin_items(&self) -> Vec<BinFeedItem>;
}

/// Output surface the board writes to.
///
/// `set_label` reports a missing target so the board can skip that
/// category without affecting the others. Style and removal calls target
/// individual items and are expected to be cheap and idempotent.
pub trait BoardRenderer {
    fn set_label(&mut self, category: Category, text: &str) -> Result<(), BoardError>;
    fn set_style(&mut self, id: EntryId, style: StyleState);
    fn remove_item(&mut self, id: EntryId);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no output target for the {} label", .category.as_str())]
    MissingTarget { category: Category },
}

/// What one reconciliation cycle did.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub transit_label: Option<String>,
    pub fixture_label: Option<String>,
    pub bin_label: Option<String>,
    /// Items whose removal was triggered this tick (first trigger only).
    pub removed: Vec<EntryId>,
    pub failed_categories: Vec<(Category, BoardError)>,
}

impl TickResult {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

type Observer = Box<dyn Fn(&TickSnapshot)>;

/// Drives the dashboard: stateless per-tick recomputation plus the
/// removal side-table and the post-update observer list.
pub struct BoardService {
    config: BoardConfig,
    windows: FixtureWindows,
    removing: HashSet<EntryId>,
    observers: Vec<Observer>,
}

impl Default for BoardService {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl BoardService {
    pub fn new(config: BoardConfig) -> Self {
        let windows = FixtureWindows::from_config(&config);
        Self {
            config,
            windows,
            removing: HashSet::new(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Register a post-update observer, invoked after every cycle with the
    /// tick's snapshot. This replaces wrapping the update function itself.
    pub fn add_observer(&mut self, observer: impl Fn(&TickSnapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Whether an item's removal has been triggered and not yet completed.
    pub fn is_removing(&self, id: EntryId) -> bool {
        self.removing.contains(&id)
    }

    /// Run one cycle against the wall clock.
    pub fn tick<F, R>(&mut self, feed: &F, renderer: &mut R) -> TickResult
    where
        F: BoardFeed + ?Sized,
        R: BoardRenderer + ?Sized,
    {
        self.tick_at(Local::now(), feed, renderer)
    }

    /// Run one cycle at an explicit time. All state is re-derived from the
    /// feed; running twice with the same clock is a no-op beyond re-writing
    /// identical labels.
    pub fn tick_at<F, R>(&mut self, now: DateTime<Local>, feed: &F, renderer: &mut R) -> TickResult
    where
        F: BoardFeed + ?Sized,
        R: BoardRenderer + ?Sized,
    {
        let transit_items = feed.transit_items();
        let fixture_items = feed.fixture_items();
        let bin_items = feed.bin_items();

        self.prune_detached(&transit_items, &fixture_items, &bin_items);

        let mut result = TickResult::default();
        let mut snapshot = TickSnapshot::new(now);

        match self.update_transit(now, &transit_items, renderer, &mut result, &mut snapshot) {
            Ok(label) => {
                snapshot.transit_label = Some(label.clone());
                result.transit_label = Some(label);
            }
            Err(err) => {
                log::warn!("skipping transit update: {}", err);
                result.failed_categories.push((Category::Transit, err));
            }
        }

        match self.update_fixtures(now, &fixture_items, renderer, &mut result, &mut snapshot) {
            Ok(label) => {
                snapshot.fixture_label = Some(label.clone());
                result.fixture_label = Some(label);
            }
            Err(err) => {
                log::warn!("skipping fixture update: {}", err);
                result.failed_categories.push((Category::Fixture, err));
            }
        }

        match self.update_bins(now, &bin_items, renderer, &mut result, &mut snapshot) {
            Ok(label) => {
                snapshot.bin_label = Some(label.clone());
                result.bin_label = Some(label);
            }
            Err(err) => {
                log::warn!("skipping bin update: {}", err);
                result.failed_categories.push((Category::BinCollection, err));
            }
        }

        for observer in &self.observers {
            observer(&snapshot);
        }

        result
    }

    /// Drop removal markers for items the feed no longer shows; their
    /// removal has completed and the id may be reused for a fresh item.
    fn prune_detached(
        &mut self,
        transit: &[FeedItem],
        fixtures: &[FeedItem],
        bins: &[BinFeedItem],
    ) {
        if self.removing.is_empty() {
            return;
        }
        let present: HashSet<EntryId> = transit
            .iter()
            .map(|item| item.id)
            .chain(fixtures.iter().map(|item| item.id))
            .chain(bins.iter().map(|item| item.id))
            .collect();
        self.removing.retain(|id| present.contains(id));
    }

    fn update_transit<R>(
        &mut self,
        now: DateTime<Local>,
        items: &[FeedItem],
        renderer: &mut R,
        result: &mut TickResult,
        snapshot: &mut TickSnapshot,
    ) -> Result<String, BoardError>
    where
        R: BoardRenderer + ?Sized,
    {
        let mut kept: Vec<(DatedEvent, Classification)> = Vec::new();
        let mut to_remove: Vec<EntryId> = Vec::new();

        for item in items {
            snapshot.transit_times.push(item.text.trim().to_string());
            // Rolled parse: a service at 00:10 seen after midnight is tomorrow's.
            let Some(departure) = parse_clock_time(&item.text, true, now) else {
                continue;
            };
            let classification = classify_transit(departure, now, self.config.imminent_lead_minutes);
            if classification.remove_now {
                to_remove.push(item.id);
            } else {
                kept.push((
                    DatedEvent {
                        id: item.id,
                        timestamp: departure,
                        category: Category::Transit,
                        source_text: item.text.clone(),
                        bin_type: None,
                    },
                    classification,
                ));
            }
        }

        let departures: Vec<DateTime<Local>> = kept
            .iter()
            .filter(|(event, _)| !self.removing.contains(&event.id))
            .map(|(event, _)| event.timestamp)
            .collect();
        let label = transit_label(next_transit(&departures, now), now, self.config.transit_mode);

        renderer.set_label(Category::Transit, &label)?;

        for (event, classification) in &kept {
            if !self.removing.contains(&event.id) {
                renderer.set_style(event.id, transit_style(*classification));
            }
        }
        for id in to_remove {
            self.request_removal(id, Category::Transit, renderer, result);
        }

        Ok(label)
    }

    fn update_fixtures<R>(
        &mut self,
        now: DateTime<Local>,
        items: &[FeedItem],
        renderer: &mut R,
        result: &mut TickResult,
        snapshot: &mut TickSnapshot,
    ) -> Result<String, BoardError>
    where
        R: BoardRenderer + ?Sized,
    {
        let mut kept: Vec<DatedEvent> = Vec::new();
        let mut to_remove: Vec<EntryId> = Vec::new();

        for item in items {
            let parsed = parse_fixture_time(&item.text);
            snapshot.fixtures.push(ParsedText {
                text: item.text.clone(),
                parsed,
            });
            let Some(kickoff) = parsed else { continue };
            let classification = classify_fixture(kickoff, now, &self.windows);
            if classification.remove_now {
                to_remove.push(item.id);
            } else {
                kept.push(DatedEvent {
                    id: item.id,
                    timestamp: kickoff,
                    category: Category::Fixture,
                    source_text: item.text.clone(),
                    bin_type: None,
                });
            }
        }

        let kickoffs: Vec<DateTime<Local>> = kept
            .iter()
            .filter(|event| !self.removing.contains(&event.id))
            .map(|event| event.timestamp)
            .collect();
        let relevant = relevant_fixture(&kickoffs, now, &self.windows);
        snapshot.relevant_fixture = relevant;
        let label = fixture_label(relevant, now, &self.windows);

        renderer.set_label(Category::Fixture, &label)?;

        for event in &kept {
            if !self.removing.contains(&event.id) {
                renderer.set_style(event.id, fixture_style(event.timestamp, now, &self.windows));
            }
        }
        for id in to_remove {
            self.request_removal(id, Category::Fixture, renderer, result);
        }

        Ok(label)
    }

    fn update_bins<R>(
        &mut self,
        now: DateTime<Local>,
        items: &[BinFeedItem],
        renderer: &mut R,
        result: &mut TickResult,
        snapshot: &mut TickSnapshot,
    ) -> Result<String, BoardError>
    where
        R: BoardRenderer + ?Sized,
    {
        let mut kept: Vec<DatedEvent> = Vec::new();
        let mut to_remove: Vec<EntryId> = Vec::new();

        for item in items {
            let parsed = parse_bin_date(&item.date_text);
            let bin_type = parse_bin_badge(&item.badge_text);
            snapshot.bins.push(BinDebug {
                date_text: item.date_text.clone(),
                badge: item.badge_text.clone(),
                parsed,
                bin_type,
            });
            let Some(date) = parsed else { continue };
            if classify_bin(date, now).remove_now {
                to_remove.push(item.id);
            } else {
                kept.push(DatedEvent {
                    id: item.id,
                    timestamp: date,
                    category: Category::BinCollection,
                    source_text: item.date_text.clone(),
                    bin_type,
                });
            }
        }

        let selectable: Vec<DatedEvent> = kept
            .iter()
            .filter(|event| !self.removing.contains(&event.id))
            .cloned()
            .collect();
        let next = next_bin(&selectable, now);
        let label = bin_label(next, now);
        let next_id = next.map(|event| event.id);

        renderer.set_label(Category::BinCollection, &label)?;

        for event in &kept {
            if self.removing.contains(&event.id) {
                continue;
            }
            let style = if Some(event.id) == next_id {
                bin_highlight(event.timestamp, now)
            } else {
                StyleState::None
            };
            renderer.set_style(event.id, style);
        }
        for id in to_remove {
            self.request_removal(id, Category::BinCollection, renderer, result);
        }

        Ok(label)
    }

    /// Trigger removal at most once per item. Repeated ticks over an
    /// element that is still animating out must not restart the animation.
    fn request_removal<R>(
        &mut self,
        id: EntryId,
        category: Category,
        renderer: &mut R,
        result: &mut TickResult,
    ) where
        R: BoardRenderer + ?Sized,
    {
        if !self.removing.insert(id) {
            return;
        }
        log::info!("removing expired {} entry {:?}", category.as_str(), id);
        renderer.remove_item(id);
        result.removed.push(id);
    }
}
