//! Yearly player decisions and their validation.
//!
//! The simulator trusts validated decisions and never re-checks them; the
//! stage helpers exist so a front end can re-prompt on the exact field that
//! failed, the way the classic game nagged "Think again".
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::state::GameState;

/// One year's validated player decisions, consumed once by the simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Acres to trade: positive buys, negative sells.
    pub acres_traded: i64,
    /// Bushels released from store to feed the population.
    pub bushels_fed: u32,
    /// Acres to plant with seed.
    pub acres_planted: u32,
}

/// Errors raised when a proposed decision violates the trading, feeding, or
/// planting preconditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    #[error("buying {acres} acres costs {cost} bushels but only {store} are in store")]
    LandPurchaseCost { acres: i64, cost: i64, store: i64 },
    #[error("cannot sell {requested} acres when the city owns {owned}")]
    LandSaleAcres { requested: i64, owned: u32 },
    #[error("cannot feed {requested} bushels with {store} in store")]
    FeedExceedsStore { requested: u32, store: i64 },
    #[error("seeding {requested} acres needs {cost} bushels but only {store} are in store")]
    SeedExceedsStore {
        requested: u32,
        cost: i64,
        store: i64,
    },
    #[error("cannot plant {requested} acres when the city owns {owned}")]
    PlantExceedsAcres { requested: u32, owned: u32 },
    #[error("{requested} acres need more hands than {population} people can supply")]
    WorkforceExceeded { requested: u32, population: u32 },
}

/// Validate a land trade against the current store, acreage, and land price.
///
/// # Errors
///
/// Returns `DecisionError` when a purchase is unaffordable or a sale exceeds
/// the city's acreage.
pub fn validate_trade(state: &GameState, acres_traded: i64) -> Result<(), DecisionError> {
    if acres_traded > 0 {
        let cost = acres_traded.saturating_mul(i64::from(state.land_price));
        if cost > state.store_bushels() {
            return Err(DecisionError::LandPurchaseCost {
                acres: acres_traded,
                cost,
                store: state.store_bushels(),
            });
        }
    } else if acres_traded < 0 {
        let requested = acres_traded.saturating_neg();
        if requested > i64::from(state.acres) {
            return Err(DecisionError::LandSaleAcres {
                requested,
                owned: state.acres,
            });
        }
    }
    Ok(())
}

/// Validate a feed amount against the store remaining after the land trade.
///
/// # Errors
///
/// Returns `DecisionError::FeedExceedsStore` when the feed amount exceeds
/// the post-trade store.
pub fn validate_feed(
    state: &GameState,
    acres_traded: i64,
    bushels_fed: u32,
) -> Result<(), DecisionError> {
    let store = store_after_trade(state, acres_traded);
    if i64::from(bushels_fed) > store {
        return Err(DecisionError::FeedExceedsStore {
            requested: bushels_fed,
            store,
        });
    }
    Ok(())
}

/// Validate planted acreage against remaining store, owned acres, and the
/// workforce constraint.
///
/// # Errors
///
/// Returns `DecisionError` naming the violated bound.
pub fn validate_plant(
    state: &GameState,
    cfg: &GameConfig,
    acres_traded: i64,
    bushels_fed: u32,
    acres_planted: u32,
) -> Result<(), DecisionError> {
    let store = store_after_trade(state, acres_traded) - i64::from(bushels_fed);
    let seed_cost = cfg.seed_cost(acres_planted);
    #[allow(clippy::cast_precision_loss)]
    let store_f = store as f64;
    if seed_cost > store_f {
        return Err(DecisionError::SeedExceedsStore {
            requested: acres_planted,
            cost: crate::numbers::round_f64_to_i64(seed_cost),
            store,
        });
    }
    let owned = acres_after_trade(state, acres_traded);
    if u64::from(acres_planted) > u64::from(owned) {
        return Err(DecisionError::PlantExceedsAcres {
            requested: acres_planted,
            owned,
        });
    }
    if u64::from(acres_planted) > state.workforce_capacity(cfg) {
        return Err(DecisionError::WorkforceExceeded {
            requested: acres_planted,
            population: state.population,
        });
    }
    Ok(())
}

/// Validate a complete decision, staging the checks the way the prompts run.
///
/// # Errors
///
/// Returns the first `DecisionError` encountered, in prompt order.
pub fn validate_decision(
    state: &GameState,
    cfg: &GameConfig,
    decision: &Decision,
) -> Result<(), DecisionError> {
    validate_trade(state, decision.acres_traded)?;
    validate_feed(state, decision.acres_traded, decision.bushels_fed)?;
    validate_plant(
        state,
        cfg,
        decision.acres_traded,
        decision.bushels_fed,
        decision.acres_planted,
    )
}

fn store_after_trade(state: &GameState, acres_traded: i64) -> i64 {
    state
        .store_bushels()
        .saturating_sub(acres_traded.saturating_mul(i64::from(state.land_price)))
}

fn acres_after_trade(state: &GameState, acres_traded: i64) -> u32 {
    crate::numbers::clamp_i64_to_u32(i64::from(state.acres).saturating_add(acres_traded))
}
