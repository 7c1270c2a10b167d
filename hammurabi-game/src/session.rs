//! High-level session wrapper binding config, state, stats, and RNG streams.
use std::rc::Rc;

use crate::config::{ConfigError, GameConfig};
use crate::constants::{LOG_DEPOPULATED, LOG_IMPEACHED, LOG_TERM_COMPLETE};
use crate::decision::{Decision, DecisionError, validate_decision};
use crate::endgame::{RuinCause, TermStatus, evaluate_term};
use crate::report::{FinalSummary, Quality, YearReport};
use crate::rng::{RngBundle, YearDraws, roll_land_price};
use crate::state::{CumulativeStats, GameState};
use crate::year::{YearEvents, simulate_year};

/// One complete governorship: owns the state, rolls the draws, aggregates
/// the reign statistics, and evaluates end conditions after every year.
#[derive(Debug, Clone)]
pub struct GameSession {
    cfg: GameConfig,
    state: GameState,
    stats: CumulativeStats,
    rng: Rc<RngBundle>,
    status: TermStatus,
    seed: u64,
    year_opened: bool,
}

impl GameSession {
    /// Start a fresh session from a seed with the classic balance.
    /// # Panics
    ///
    /// Never panics in practice: the default configuration always validates.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default()).expect("default config is valid")
    }

    /// Start a fresh session from a seed and an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration violates validation rules.
    pub fn with_config(seed: u64, cfg: GameConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let state = GameState::from_config(&cfg);
        let stats = CumulativeStats::seeded(&cfg);
        Ok(Self {
            cfg,
            state,
            stats,
            rng: Rc::new(RngBundle::from_user_seed(seed)),
            status: TermStatus::Playing,
            seed,
            year_opened: false,
        })
    }

    /// Open the current year: apply the arrivals computed last year and
    /// produce the report the front end narrates. Idempotent within a year.
    pub fn begin_year(&mut self) -> YearReport {
        if !self.year_opened {
            let arrivals = self.state.immigrants_pending;
            self.state.population = self.state.population.saturating_add(arrivals);
            self.state.immigrants_last = arrivals;
            self.state.immigrants_pending = 0;
            self.year_opened = true;
        }
        YearReport {
            year: self.state.year,
            starved: self.state.starved_last,
            immigrants: self.state.immigrants_last,
            plague_deaths: self.state.plague_deaths_last,
            population: self.state.population,
            acres: self.state.acres,
            grain_yield: self.state.yield_last,
            yield_quality: Quality::classify(
                f64::from(self.state.yield_last),
                1.0,
                f64::from(self.cfg.max_yield),
            ),
            rat_loss: self.state.rat_loss_last,
            store: self.state.store_bushels(),
        }
    }

    /// Roll and record this year's land price.
    pub fn roll_land_price(&mut self) -> u32 {
        let price = roll_land_price(&self.rng, &self.cfg);
        self.state.land_price = price;
        price
    }

    /// Advance the simulation by one year with a validated decision.
    ///
    /// The decision is run through the validator before it reaches the
    /// simulator, so the simulation invariants hold unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `DecisionError` when the decision violates a precondition;
    /// the state is untouched in that case.
    pub fn advance_year(&mut self, decision: &Decision) -> Result<YearEvents, DecisionError> {
        validate_decision(&self.state, &self.cfg, decision)?;
        let draws = YearDraws::roll(&self.rng, &self.cfg);
        let events = simulate_year(&mut self.state, &self.cfg, decision, &draws);
        self.stats.record(&events);
        self.status = evaluate_term(&self.state, &self.cfg);
        match self.status {
            TermStatus::Impeached(RuinCause::Depopulation) => self.state.push_log(LOG_DEPOPULATED),
            TermStatus::Impeached(RuinCause::MassStarvation) => self.state.push_log(LOG_IMPEACHED),
            TermStatus::Completed => self.state.push_log(LOG_TERM_COMPLETE),
            TermStatus::Playing => {}
        }
        self.year_opened = false;
        Ok(events)
    }

    /// Current termination status.
    #[must_use]
    pub const fn status(&self) -> TermStatus {
        self.status
    }

    /// Borrow the underlying immutable game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Borrow the underlying mutable game state.
    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Borrow the session configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    /// Reign-wide totals.
    #[must_use]
    pub const fn stats(&self) -> &CumulativeStats {
        &self.stats
    }

    /// Seed the session was started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Final accounting for the end-of-term narration.
    #[must_use]
    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary {
            status: self.status,
            years: self.state.year,
            seed: self.seed,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_everyone(session: &GameSession) -> Decision {
        let state = session.state();
        let cfg = session.config();
        let need = state.population.saturating_mul(cfg.feed_per_person);
        let store = u32::try_from(state.store_bushels()).unwrap_or(u32::MAX);
        Decision {
            acres_traded: 0,
            bushels_fed: need.min(store),
            acres_planted: 0,
        }
    }

    #[test]
    fn arrivals_land_at_the_start_of_the_following_year() {
        let mut session = GameSession::new(42);
        let report = session.begin_year();
        // Seeded first ingress.
        assert_eq!(report.immigrants, 5);
        assert_eq!(report.population, 100);

        session.roll_land_price();
        let decision = feed_everyone(&session);
        let events = session.advance_year(&decision).unwrap();
        let pop_after_year = session.state().population;

        // Immigrants computed this year are pending, not yet counted.
        assert_eq!(session.state().immigrants_pending, events.immigrants);
        let report = session.begin_year();
        assert_eq!(report.immigrants, events.immigrants);
        assert_eq!(report.population, pop_after_year + events.immigrants);
    }

    #[test]
    fn begin_year_is_idempotent_within_a_year() {
        let mut session = GameSession::new(7);
        let first = session.begin_year();
        let second = session.begin_year();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_decisions_leave_state_untouched() {
        let mut session = GameSession::new(9);
        let _ = session.begin_year();
        session.roll_land_price();
        let before = session.state().clone();
        let greedy = Decision {
            acres_traded: 1_000_000,
            bushels_fed: 0,
            acres_planted: 0,
        };
        assert!(session.advance_year(&greedy).is_err());
        assert_eq!(session.state(), &before);
        assert_eq!(session.status(), TermStatus::Playing);
    }

    #[test]
    fn starving_the_city_ends_the_term() {
        let mut session = GameSession::new(11);
        let _ = session.begin_year();
        session.roll_land_price();
        let famine = Decision::default();
        let _ = session.advance_year(&famine).unwrap();
        assert!(session.status().is_terminal());
        let summary = session.final_summary();
        assert!(matches!(summary.status, TermStatus::Impeached(_)));
        assert!(summary.stats.total_starved > 0);
    }

    #[test]
    fn same_seed_replays_identically() {
        let play = |seed: u64| {
            let mut session = GameSession::new(seed);
            for _ in 0..4 {
                let _ = session.begin_year();
                if session.status().is_terminal() {
                    break;
                }
                session.roll_land_price();
                let decision = feed_everyone(&session);
                session.advance_year(&decision).unwrap();
            }
            session.state().clone()
        };
        assert_eq!(play(1_234), play(1_234));
    }

    #[test]
    fn stats_fold_in_each_year() {
        let mut session = GameSession::new(3);
        let _ = session.begin_year();
        session.roll_land_price();
        let decision = feed_everyone(&session);
        let events = session.advance_year(&decision).unwrap();
        let stats = session.stats();
        assert_eq!(
            stats.total_harvested,
            3_000 + u64::from(events.harvest)
        );
        assert_eq!(stats.total_rat_loss, 200 + u64::from(events.rat_loss));
    }
}
