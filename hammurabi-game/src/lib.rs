//! Hammurabi Game Engine
//!
//! Platform-agnostic core logic for the classic Hammurabi city governance
//! game: govern ancient Sumeria for a fixed term, balancing land, grain,
//! population, and stochastic misfortune. This crate provides the full
//! simulation without UI or platform-specific dependencies; randomness is
//! injected as explicit draw records so every year is deterministically
//! replayable.

pub mod config;
pub mod constants;
pub mod decision;
pub mod endgame;
pub mod numbers;
pub mod report;
pub mod rng;
pub mod session;
pub mod state;
pub mod year;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use decision::{
    Decision, DecisionError, validate_decision, validate_feed, validate_plant, validate_trade,
};
pub use endgame::{RuinCause, TermStatus, evaluate_term};
pub use report::{Abundance, FinalSummary, PriceLevel, Quality, YearReport, fifth};
pub use rng::{CountingRng, RngBundle, YearDraws, roll_land_price};
pub use session::GameSession;
pub use state::{CumulativeStats, EventTag, EventTagSet, GameState};
pub use year::{YearEvents, simulate_year};
