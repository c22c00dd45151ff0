use serde::{Deserialize, Serialize};

use super::entry::TransitMode;

/// Widget configuration. Persisted as JSON; every field has a default so a
/// partial or missing config file still yields a working board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Drives the noun in the transit countdown label.
    pub transit_mode: TransitMode,
    /// Transit entries within this many minutes of departure are highlighted.
    pub imminent_lead_minutes: i64,
    /// Fixture alert window opens this many minutes before kickoff.
    pub fixture_pre_kickoff_minutes: i64,
    /// Minutes after kickoff during which a match counts as ongoing.
    pub fixture_ongoing_minutes: i64,
    /// Minutes after kickoff at which a match is over and removed.
    pub fixture_finishing_minutes: i64,
    /// Seconds between reconciliation cycles.
    pub tick_interval_secs: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            transit_mode: TransitMode::default(),
            imminent_lead_minutes: 15,
            fixture_pre_kickoff_minutes: 60,
            fixture_ongoing_minutes: 120,
            fixture_finishing_minutes: 150,
            tick_interval_secs: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_display_logic() {
        let config = BoardConfig::default();
        assert_eq!(config.transit_mode, TransitMode::Tram);
        assert_eq!(config.imminent_lead_minutes, 15);
        assert_eq!(config.fixture_pre_kickoff_minutes, 60);
        assert_eq!(config.fixture_ongoing_minutes, 120);
        assert_eq!(config.fixture_finishing_minutes, 150);
        assert_eq!(config.tick_interval_secs, 1);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"transit_mode":"bus"}"#).unwrap();
        assert_eq!(config.transit_mode, TransitMode::Bus);
        assert_eq!(config.imminent_lead_minutes, 15);
        assert_eq!(config.fixture_finishing_minutes, 150);
    }
}
