//! Mutable game state and cumulative reign statistics.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::config::GameConfig;
use crate::numbers::trunc_f64_to_i64;

/// Maximum tag capacity stored inline without additional allocations.
pub type EventTagSet = SmallVec<[EventTag; 4]>;

/// Tag describing a notable event inside a simulated year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTag(pub String);

impl EventTag {
    /// Construct a tag from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns true when the tag has no visible characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full mutable state of one governorship, advanced once per year.
///
/// The grain store is kept as a fractional accumulator because seed cost may
/// be fractional; integer formulas (rat loss, immigration) and presentation
/// use [`GameState::store_bushels`], which truncates to whole bushels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current year of the term, starting at 1.
    pub year: u32,
    /// Living population. Never negative; plague and starvation clamp it.
    pub population: u32,
    /// City-owned farmland in acres.
    pub acres: u32,
    /// Bushels of grain in storage, with fractional precision retained.
    pub store: f64,
    /// Land price in bushels per acre for the current year's trading.
    pub land_price: u32,
    /// Bushels per acre from the most recent harvest.
    pub yield_last: u32,
    /// Bushels produced by the most recent harvest.
    pub harvest_last: u32,
    /// Bushels lost to rats in the most recent year.
    pub rat_loss_last: u32,
    /// People starved in the most recent year, reported one year later.
    pub starved_last: u32,
    /// People killed by plague in the most recent year.
    pub plague_deaths_last: u32,
    /// People who arrived at the start of the current year.
    pub immigrants_last: u32,
    /// Arrivals computed this year, applied at the start of the next year.
    pub immigrants_pending: u32,
    /// Log keys recorded across the reign, rendered by the front end.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl GameState {
    /// Build the seeded year-one state from a configuration.
    #[must_use]
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            year: 1,
            population: cfg.population_start,
            acres: cfg.starting_acres(),
            store: f64::from(cfg.store_start),
            land_price: 0,
            yield_last: cfg.yield_start,
            harvest_last: cfg.harvest_start,
            rat_loss_last: cfg.starting_rat_loss(),
            starved_last: 0,
            plague_deaths_last: 0,
            immigrants_last: 0,
            immigrants_pending: cfg.arrivals_start,
            logs: Vec::new(),
        }
    }

    /// Whole bushels in store, truncating the fractional accumulator.
    #[must_use]
    pub fn store_bushels(&self) -> i64 {
        trunc_f64_to_i64(self.store).max(0)
    }

    /// Maximum acres the current population can tend.
    #[must_use]
    pub fn workforce_capacity(&self, cfg: &GameConfig) -> u64 {
        u64::from(cfg.workforce_per_person) * u64::from(self.population)
    }

    /// Record a log key for the front end.
    pub fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Reign-wide totals aggregated by the session loop, never by the simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeStats {
    /// Total people starved across the reign.
    pub total_starved: u64,
    /// Number of plague years survived.
    pub plagues: u32,
    /// Total people lost to plague.
    pub plague_deaths: u64,
    /// Total bushels harvested, including the seeded first harvest.
    pub total_harvested: u64,
    /// Total bushels lost to rats, including the seeded first loss.
    pub total_rat_loss: u64,
}

impl CumulativeStats {
    /// Seed the totals with the pre-term harvest and rat loss from config.
    #[must_use]
    pub fn seeded(cfg: &GameConfig) -> Self {
        Self {
            total_harvested: u64::from(cfg.harvest_start),
            total_rat_loss: u64::from(cfg.starting_rat_loss()),
            ..Self::default()
        }
    }

    /// Fold one simulated year into the totals.
    pub fn record(&mut self, events: &crate::year::YearEvents) {
        self.total_starved += u64::from(events.starved);
        if events.plague_deaths > 0 {
            self.plagues += 1;
            self.plague_deaths += u64::from(events.plague_deaths);
        }
        self.total_harvested += u64::from(events.harvest);
        self.total_rat_loss += u64::from(events.rat_loss);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_state_matches_classic_opening() {
        let state = GameState::default();
        assert_eq!(state.year, 1);
        assert_eq!(state.population, 95);
        assert_eq!(state.acres, 1_000);
        assert_eq!(state.store_bushels(), 2_800);
        assert_eq!(state.rat_loss_last, 200);
        assert_eq!(state.immigrants_pending, 5);
    }

    #[test]
    fn store_bushels_truncates_fraction() {
        let mut state = GameState::default();
        state.store = 899.5;
        assert_eq!(state.store_bushels(), 899);
        state.store = -3.0;
        assert_eq!(state.store_bushels(), 0);
    }

    #[test]
    fn workforce_capacity_scales_with_population() {
        let cfg = GameConfig::default();
        let mut state = GameState::from_config(&cfg);
        assert_eq!(state.workforce_capacity(&cfg), 950);
        state.population = 0;
        assert_eq!(state.workforce_capacity(&cfg), 0);
    }

    #[test]
    fn stats_seeding_includes_first_harvest() {
        let stats = CumulativeStats::seeded(&GameConfig::default());
        assert_eq!(stats.total_harvested, 3_000);
        assert_eq!(stats.total_rat_loss, 200);
        assert_eq!(stats.plagues, 0);
    }
}
