//! End-of-term evaluation: impeachment, depopulation, and term completion.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::state::GameState;

/// Why a governorship ended in disgrace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuinCause {
    /// Too large a share of the population starved in a single year.
    MassStarvation,
    /// Nobody is left alive to govern.
    Depopulation,
}

impl fmt::Display for RuinCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MassStarvation => f.write_str("mass_starvation"),
            Self::Depopulation => f.write_str("depopulation"),
        }
    }
}

/// Two-state termination machine: `Playing` transitions to exactly one of
/// the terminal outcomes and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermStatus {
    /// The term continues; another year will be played.
    Playing,
    /// Thrown out of office.
    Impeached(RuinCause),
    /// Served the full term of office.
    Completed,
}

impl TermStatus {
    /// Whether the game is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Decide whether the term ends, given the most recent year's starvation.
///
/// Impeachment uses a strict inequality on the post-starvation population:
/// starving exactly the threshold share keeps the governor in office.
#[must_use]
pub fn evaluate_term(state: &GameState, cfg: &GameConfig) -> TermStatus {
    if state.population == 0 {
        return TermStatus::Impeached(RuinCause::Depopulation);
    }
    let starved_scaled = u64::from(state.starved_last) * 100;
    let threshold_scaled = u64::from(cfg.starvation_threshold_pct) * u64::from(state.population);
    if starved_scaled > threshold_scaled {
        return TermStatus::Impeached(RuinCause::MassStarvation);
    }
    if state.year >= cfg.term_years {
        return TermStatus::Completed;
    }
    TermStatus::Playing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_term_state() -> GameState {
        let mut state = GameState::default();
        state.year = 4;
        state
    }

    #[test]
    fn quiet_years_keep_playing() {
        let cfg = GameConfig::default();
        let state = mid_term_state();
        assert_eq!(evaluate_term(&state, &cfg), TermStatus::Playing);
    }

    #[test]
    fn impeachment_requires_strict_inequality() {
        let cfg = GameConfig::default();
        let mut state = mid_term_state();
        // threshold 45%, population 100: 45 starved is exactly the boundary.
        state.population = 100;
        state.starved_last = 45;
        assert_eq!(evaluate_term(&state, &cfg), TermStatus::Playing);

        state.starved_last = 46;
        assert_eq!(
            evaluate_term(&state, &cfg),
            TermStatus::Impeached(RuinCause::MassStarvation)
        );
    }

    #[test]
    fn depopulation_is_immediately_terminal() {
        let cfg = GameConfig::default();
        let mut state = mid_term_state();
        state.population = 0;
        state.starved_last = 0;
        assert_eq!(
            evaluate_term(&state, &cfg),
            TermStatus::Impeached(RuinCause::Depopulation)
        );
    }

    #[test]
    fn term_completes_at_final_year() {
        let cfg = GameConfig::default();
        let mut state = mid_term_state();
        state.year = 10;
        assert_eq!(evaluate_term(&state, &cfg), TermStatus::Completed);
        state.year = 9;
        assert_eq!(evaluate_term(&state, &cfg), TermStatus::Playing);
    }

    #[test]
    fn impeachment_outranks_completion() {
        let cfg = GameConfig::default();
        let mut state = mid_term_state();
        state.year = 10;
        state.population = 10;
        state.starved_last = 9;
        assert_eq!(
            evaluate_term(&state, &cfg),
            TermStatus::Impeached(RuinCause::MassStarvation)
        );
    }

    #[test]
    fn terminal_states_report_as_such() {
        assert!(!TermStatus::Playing.is_terminal());
        assert!(TermStatus::Completed.is_terminal());
        assert!(TermStatus::Impeached(RuinCause::Depopulation).is_terminal());
    }
}
