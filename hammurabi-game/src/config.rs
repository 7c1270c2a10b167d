//! Game tuning configuration with validation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ARRIVALS_START, FEED_PER_PERSON, GOVERNMENT_TERM_YEARS, HARVEST_START, LAND_PRICE_BASE,
    LAND_PRICE_SPREAD, LAND_VALUE_FACTOR, MAX_BABIES, MAX_RATS, MAX_YIELD, PLAGUE_CHANCE_PCT,
    POPULATION_START, SEED_PER_ACRE, STARVATION_THRESHOLD_PCT, STORE_START,
    WORKFORCE_PER_PERSON, YIELD_START,
};

/// Tuning bundle for one game session. Defaults reproduce the classic balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of years in the governor's term of office.
    #[serde(default = "GameConfig::default_term_years")]
    pub term_years: u32,
    /// Population at the start of year one.
    #[serde(default = "GameConfig::default_population_start")]
    pub population_start: u32,
    /// First ingress of people, applied at the start of year one.
    #[serde(default = "GameConfig::default_arrivals_start")]
    pub arrivals_start: u32,
    /// Bushels in store at the start of year one.
    #[serde(default = "GameConfig::default_store_start")]
    pub store_start: u32,
    /// Bushels harvested in the seeded year preceding year one.
    #[serde(default = "GameConfig::default_harvest_start")]
    pub harvest_start: u32,
    /// Bushels per acre in the seeded year preceding year one.
    #[serde(default = "GameConfig::default_yield_start")]
    pub yield_start: u32,
    /// Upper bound of the uniform yearly yield roll, inclusive.
    #[serde(default = "GameConfig::default_max_yield")]
    pub max_yield: u32,
    /// Upper bound of the uniform yearly rat-count roll, inclusive.
    #[serde(default = "GameConfig::default_max_rats")]
    pub max_rats: u32,
    /// Upper bound of the uniform yearly immigration roll, inclusive.
    #[serde(default = "GameConfig::default_max_babies")]
    pub max_babies: u32,
    /// Percent chance of a plague halving the population in any given year.
    #[serde(default = "GameConfig::default_plague_chance_pct")]
    pub plague_chance_pct: u32,
    /// Bushels required to fully feed one person for a year.
    #[serde(default = "GameConfig::default_feed_per_person")]
    pub feed_per_person: u32,
    /// Bushels of seed required per planted acre. May be fractional.
    #[serde(default = "GameConfig::default_seed_per_acre")]
    pub seed_per_acre: f64,
    /// Acres one person can tend.
    #[serde(default = "GameConfig::default_workforce_per_person")]
    pub workforce_per_person: u32,
    /// Percent of the population that, if starved in one year, ends the term.
    #[serde(default = "GameConfig::default_starvation_threshold_pct")]
    pub starvation_threshold_pct: u32,
    /// Bushel valuation of one acre in the immigration formula.
    #[serde(default = "GameConfig::default_land_value_factor")]
    pub land_value_factor: u32,
    /// Minimum land price in bushels per acre.
    #[serde(default = "GameConfig::default_land_price_base")]
    pub land_price_base: u32,
    /// Width of the uniform land price roll above the base.
    #[serde(default = "GameConfig::default_land_price_spread")]
    pub land_price_spread: u32,
}

impl GameConfig {
    const fn default_term_years() -> u32 {
        GOVERNMENT_TERM_YEARS
    }

    const fn default_population_start() -> u32 {
        POPULATION_START
    }

    const fn default_arrivals_start() -> u32 {
        ARRIVALS_START
    }

    const fn default_store_start() -> u32 {
        STORE_START
    }

    const fn default_harvest_start() -> u32 {
        HARVEST_START
    }

    const fn default_yield_start() -> u32 {
        YIELD_START
    }

    const fn default_max_yield() -> u32 {
        MAX_YIELD
    }

    const fn default_max_rats() -> u32 {
        MAX_RATS
    }

    const fn default_max_babies() -> u32 {
        MAX_BABIES
    }

    const fn default_plague_chance_pct() -> u32 {
        PLAGUE_CHANCE_PCT
    }

    const fn default_feed_per_person() -> u32 {
        FEED_PER_PERSON
    }

    const fn default_seed_per_acre() -> f64 {
        SEED_PER_ACRE
    }

    const fn default_workforce_per_person() -> u32 {
        WORKFORCE_PER_PERSON
    }

    const fn default_starvation_threshold_pct() -> u32 {
        STARVATION_THRESHOLD_PCT
    }

    const fn default_land_value_factor() -> u32 {
        LAND_VALUE_FACTOR
    }

    const fn default_land_price_base() -> u32 {
        LAND_PRICE_BASE
    }

    const fn default_land_price_spread() -> u32 {
        LAND_PRICE_SPREAD
    }

    /// Parse a configuration from JSON, applying field defaults and validating.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the JSON is malformed or a field violates
    /// the documented bounds.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_min("term_years", self.term_years, 1)?;
        self.require_min("population_start", self.population_start, 1)?;
        self.require_min("max_yield", self.max_yield, 1)?;
        self.require_min("max_rats", self.max_rats, 1)?;
        self.require_min("max_babies", self.max_babies, 1)?;
        self.require_min("feed_per_person", self.feed_per_person, 1)?;
        self.require_min("workforce_per_person", self.workforce_per_person, 1)?;
        self.require_min("land_price_spread", self.land_price_spread, 1)?;
        self.require_pct("plague_chance_pct", self.plague_chance_pct)?;
        self.require_pct("starvation_threshold_pct", self.starvation_threshold_pct)?;
        if self.yield_start < 1 || self.yield_start > self.max_yield {
            return Err(ConfigError::RangeViolation {
                field: "yield_start",
                min: 1,
                max: u64::from(self.max_yield),
                value: u64::from(self.yield_start),
            });
        }
        if self.harvest_start < self.store_start {
            return Err(ConfigError::SeededHarvestBelowStore {
                harvest: self.harvest_start,
                store: self.store_start,
            });
        }
        if !self.seed_per_acre.is_finite() || self.seed_per_acre < 0.0 {
            return Err(ConfigError::SeedCost {
                value: self.seed_per_acre,
            });
        }
        Ok(())
    }

    fn require_min(&self, field: &'static str, value: u32, min: u64) -> Result<(), ConfigError> {
        if u64::from(value) < min {
            return Err(ConfigError::MinViolation {
                field,
                min,
                value: u64::from(value),
            });
        }
        Ok(())
    }

    fn require_pct(&self, field: &'static str, value: u32) -> Result<(), ConfigError> {
        if value > 100 {
            return Err(ConfigError::RangeViolation {
                field,
                min: 0,
                max: 100,
                value: u64::from(value),
            });
        }
        Ok(())
    }

    /// Seed cost in bushels for planting the given acreage.
    #[must_use]
    pub fn seed_cost(&self, acres_planted: u32) -> f64 {
        self.seed_per_acre * f64::from(acres_planted)
    }

    /// City acreage implied by the seeded harvest and yield.
    #[must_use]
    pub const fn starting_acres(&self) -> u32 {
        self.harvest_start / self.yield_start
    }

    /// Rat loss implied by the gap between seeded harvest and store.
    #[must_use]
    pub const fn starting_rat_loss(&self) -> u32 {
        self.harvest_start - self.store_start
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            term_years: Self::default_term_years(),
            population_start: Self::default_population_start(),
            arrivals_start: Self::default_arrivals_start(),
            store_start: Self::default_store_start(),
            harvest_start: Self::default_harvest_start(),
            yield_start: Self::default_yield_start(),
            max_yield: Self::default_max_yield(),
            max_rats: Self::default_max_rats(),
            max_babies: Self::default_max_babies(),
            plague_chance_pct: Self::default_plague_chance_pct(),
            feed_per_person: Self::default_feed_per_person(),
            seed_per_acre: Self::default_seed_per_acre(),
            workforce_per_person: Self::default_workforce_per_person(),
            starvation_threshold_pct: Self::default_starvation_threshold_pct(),
            land_value_factor: Self::default_land_value_factor(),
            land_price_base: Self::default_land_price_base(),
            land_price_spread: Self::default_land_price_spread(),
        }
    }
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
    #[error("seeded harvest {harvest} cannot be smaller than the seeded store {store}")]
    SeededHarvestBelowStore { harvest: u32, store: u32 },
    #[error("seed_per_acre must be a finite non-negative number (got {value})")]
    SeedCost { value: f64 },
}
