//! Centralized balance and tuning constants for Hammurabi game logic.
//!
//! These values are the classic defaults behind [`crate::config::GameConfig`];
//! sessions override them through the config layer, never by reaching in here.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_PLAGUE: &str = "log.plague";
pub(crate) const LOG_STARVATION: &str = "log.starvation";
pub(crate) const LOG_RAT_FEAST: &str = "log.rats.feast";
pub(crate) const LOG_ARRIVALS: &str = "log.arrivals";
pub(crate) const LOG_IMPEACHED: &str = "log.impeached";
pub(crate) const LOG_DEPOPULATED: &str = "log.depopulated";
pub(crate) const LOG_TERM_COMPLETE: &str = "log.term-complete";

// Term and starting conditions ---------------------------------------------
pub(crate) const GOVERNMENT_TERM_YEARS: u32 = 10;
pub(crate) const POPULATION_START: u32 = 95;
pub(crate) const ARRIVALS_START: u32 = 5;
pub(crate) const STORE_START: u32 = 2_800;
pub(crate) const HARVEST_START: u32 = 3_000;
pub(crate) const YIELD_START: u32 = 3;

// Stochastic event bounds --------------------------------------------------
pub(crate) const MAX_YIELD: u32 = 5;
pub(crate) const MAX_RATS: u32 = 5;
pub(crate) const MAX_BABIES: u32 = 5;
pub(crate) const PLAGUE_CHANCE_PCT: u32 = 15;

// Economy tuning -----------------------------------------------------------
pub(crate) const FEED_PER_PERSON: u32 = 20;
pub(crate) const SEED_PER_ACRE: f64 = 0.5;
pub(crate) const WORKFORCE_PER_PERSON: u32 = 10;
pub(crate) const STARVATION_THRESHOLD_PCT: u32 = 45;
pub(crate) const LAND_VALUE_FACTOR: u32 = 20;
pub(crate) const LAND_PRICE_BASE: u32 = 17;
pub(crate) const LAND_PRICE_SPREAD: u32 = 10;

// Plague rolls are uniform in [0, PLAGUE_ROLL_SPAN).
pub(crate) const PLAGUE_ROLL_SPAN: u32 = 100;
