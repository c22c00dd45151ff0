//! Per-tick debug snapshot for troubleshooting observers.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::entry::BinType;

/// Raw display text next to its parse result.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedText {
    pub text: String,
    pub parsed: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinDebug {
    pub date_text: String,
    pub badge: String,
    pub parsed: Option<DateTime<Local>>,
    pub bin_type: Option<BinType>,
}

/// Everything a tick derived, handed to post-update observers. Labels are
/// `None` for categories whose render target was missing.
#[derive(Debug, Clone, Serialize)]
pub struct TickSnapshot {
    pub now: DateTime<Local>,
    pub transit_times: Vec<String>,
    pub fixtures: Vec<ParsedText>,
    pub bins: Vec<BinDebug>,
    pub relevant_fixture: Option<DateTime<Local>>,
    pub transit_label: Option<String>,
    pub fixture_label: Option<String>,
    pub bin_label: Option<String>,
}

impl TickSnapshot {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now,
            transit_times: Vec::new(),
            fixtures: Vec::new(),
            bins: Vec::new(),
            relevant_fixture: None,
            transit_label: None,
            fixture_label: None,
            bin_label: None,
        }
    }
}

/// Ready-made observer that dumps the snapshot as JSON at debug level.
pub fn log_snapshot(snapshot: &TickSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => log::debug!("tick snapshot: {}", json),
        Err(err) => log::warn!("failed to serialize tick snapshot: {}", err),
    }
}
