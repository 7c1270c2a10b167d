//! The per-year state transition at the heart of the simulation.
//!
//! `simulate_year` is a pure function of `(state, decision, draws)`: identical
//! inputs always produce the identical successor state, which is what makes
//! deterministic replay and fixed-draw testing possible. Randomness arrives
//! only through the explicit [`YearDraws`] record.
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::{LOG_ARRIVALS, LOG_PLAGUE, LOG_RAT_FEAST, LOG_STARVATION};
use crate::decision::Decision;
use crate::numbers::clamp_i64_to_u32;
use crate::rng::YearDraws;
use crate::state::{EventTag, EventTagSet, GameState};

/// What happened during one simulated year, for narration and aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearEvents {
    /// Year that was simulated.
    pub year: u32,
    /// People killed by plague this year.
    pub plague_deaths: u32,
    /// People starved this year.
    pub starved: u32,
    /// Acres tended this year.
    pub acres_planted: u32,
    /// Bushels of seed spent, rounded for presentation.
    pub seed_spent: i64,
    /// Bushels per acre rolled for the harvest.
    pub grain_yield: u32,
    /// Bushels harvested this year.
    pub harvest: u32,
    /// Bushels lost to rats this year.
    pub rat_loss: u32,
    /// Arrivals computed this year, joining the city next year.
    pub immigrants: u32,
    /// Tags describing the notable events of the year.
    #[serde(default)]
    pub tags: EventTagSet,
}

impl YearEvents {
    fn push_tag(&mut self, tag: &str) {
        let tag = EventTag::new(tag);
        if tag.is_empty() || self.tags.iter().any(|existing| existing == &tag) {
            return;
        }
        self.tags.push(tag);
    }
}

/// Apply one year's validated decisions plus uniform draws to the state.
///
/// Steps run in a fixed order: plague, land trade, feeding, planting,
/// harvest, rat loss, immigration, year advance. The caller guarantees the
/// decision passed validation against this state; nothing is re-checked.
pub fn simulate_year(
    state: &mut GameState,
    cfg: &GameConfig,
    decision: &Decision,
    draws: &YearDraws,
) -> YearEvents {
    let mut events = YearEvents {
        year: state.year,
        ..YearEvents::default()
    };

    apply_plague(state, cfg, draws, &mut events);
    apply_land_trade(state, decision);
    apply_feeding(state, cfg, decision, &mut events);
    apply_planting(state, cfg, decision, &mut events);
    apply_harvest(state, decision, draws, &mut events);
    apply_rat_loss(state, draws, &mut events);
    apply_immigration(state, cfg, draws, &mut events);

    state.year = state.year.saturating_add(1);
    if state.store < 0.0 {
        // Validated decisions cannot overdraw the store; guard the invariant
        // anyway so downstream integer formulas stay total.
        debug_assert!(state.store > -1.0, "store overdrawn: {}", state.store);
        state.store = 0.0;
    }
    events
}

fn apply_plague(state: &mut GameState, cfg: &GameConfig, draws: &YearDraws, events: &mut YearEvents) {
    state.plague_deaths_last = 0;
    if draws.plague_roll < cfg.plague_chance_pct {
        let survivors = state.population / 2;
        let deaths = state.population - survivors;
        state.population = survivors;
        state.plague_deaths_last = deaths;
        state.push_log(LOG_PLAGUE);
        events.plague_deaths = deaths;
        events.push_tag("plague");
    }
}

fn apply_land_trade(state: &mut GameState, decision: &Decision) {
    let traded = decision.acres_traded;
    if traded == 0 {
        return;
    }
    let cost = traded.saturating_mul(i64::from(state.land_price));
    state.acres = clamp_i64_to_u32(i64::from(state.acres).saturating_add(traded));
    #[allow(clippy::cast_precision_loss)]
    let cost_f = cost as f64;
    state.store -= cost_f;
}

fn apply_feeding(
    state: &mut GameState,
    cfg: &GameConfig,
    decision: &Decision,
    events: &mut YearEvents,
) {
    state.store -= f64::from(decision.bushels_fed);
    let fed_count = decision.bushels_fed / cfg.feed_per_person;
    if fed_count < state.population {
        let starved = state.population - fed_count;
        state.population -= starved;
        state.starved_last = starved;
        state.push_log(LOG_STARVATION);
        events.starved = starved;
        events.push_tag("starvation");
    } else {
        state.starved_last = 0;
    }
}

fn apply_planting(
    state: &mut GameState,
    cfg: &GameConfig,
    decision: &Decision,
    events: &mut YearEvents,
) {
    let seed_cost = cfg.seed_cost(decision.acres_planted);
    state.store -= seed_cost;
    events.acres_planted = decision.acres_planted;
    events.seed_spent = crate::numbers::round_f64_to_i64(seed_cost);
}

fn apply_harvest(
    state: &mut GameState,
    decision: &Decision,
    draws: &YearDraws,
    events: &mut YearEvents,
) {
    let harvest = u64::from(decision.acres_planted) * u64::from(draws.yield_roll);
    let harvest = u32::try_from(harvest).unwrap_or(u32::MAX);
    state.yield_last = draws.yield_roll;
    state.harvest_last = harvest;
    events.grain_yield = draws.yield_roll;
    events.harvest = harvest;
}

fn apply_rat_loss(state: &mut GameState, draws: &YearDraws, events: &mut YearEvents) {
    // Rats feast only on an odd count, eating store / count of the grain
    // sitting in storage before the harvest is brought in.
    let mut loss: i64 = 0;
    if draws.rat_roll % 2 != 0 {
        loss = state.store_bushels() / i64::from(draws.rat_roll);
    }
    #[allow(clippy::cast_precision_loss)]
    let loss_f = loss as f64;
    state.store -= loss_f;
    state.store += f64::from(state.harvest_last);
    state.rat_loss_last = clamp_i64_to_u32(loss);
    events.rat_loss = state.rat_loss_last;
    if loss > 0 {
        state.push_log(LOG_RAT_FEAST);
        events.push_tag("rats");
    }
}

fn apply_immigration(
    state: &mut GameState,
    cfg: &GameConfig,
    draws: &YearDraws,
    events: &mut YearEvents,
) {
    // Immigration divides by population; a depopulated city attracts nobody
    // and the end-condition evaluator terminates the game instead.
    if state.population == 0 {
        state.immigrants_pending = 0;
        return;
    }
    let land_value = i64::from(cfg.land_value_factor) * i64::from(state.acres);
    let wealth = land_value + state.store_bushels();
    let immigrants =
        i64::from(draws.babies_roll) * wealth / i64::from(state.population) / 100 + 1;
    state.immigrants_pending = clamp_i64_to_u32(immigrants);
    state.push_log(LOG_ARRIVALS);
    events.immigrants = state.immigrants_pending;
    events.push_tag("immigration");
}
