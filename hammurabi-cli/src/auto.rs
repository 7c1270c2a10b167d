//! Scripted steward policy for unattended QA sweeps.
//!
//! Plays a cautious baseline: sell land only to cover a feeding shortfall,
//! feed everyone the store allows, plant whatever the workforce and seed
//! stock support. Useful for smoke-testing balance changes deterministically.
use anyhow::Result;
use colored::Colorize;
use log::{debug, info};

use hammurabi_game::{Decision, GameSession};

/// Decide one year the way the steward would.
#[must_use]
pub fn steward_decision(session: &GameSession, price: u32) -> Decision {
    let state = session.state();
    let cfg = session.config();
    let mut store = state.store_bushels();
    let mut acres = i64::from(state.acres);

    let need = i64::from(state.population) * i64::from(cfg.feed_per_person);
    let mut acres_traded: i64 = 0;
    if store < need && price > 0 {
        let deficit = need - store;
        let to_sell = (deficit / i64::from(price) + 1).min(acres);
        acres_traded = -to_sell;
        store += to_sell * i64::from(price);
        acres -= to_sell;
    }

    let bushels_fed = u32::try_from(need.min(store).max(0)).unwrap_or(u32::MAX);
    store -= i64::from(bushels_fed);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let affordable = if cfg.seed_per_acre > 0.0 {
        (store as f64 / cfg.seed_per_acre).floor().max(0.0) as i64
    } else {
        acres
    };
    let workforce = i64::try_from(state.workforce_capacity(cfg)).unwrap_or(i64::MAX);
    let acres_planted =
        u32::try_from(acres.min(workforce).min(affordable).max(0)).unwrap_or(u32::MAX);

    Decision {
        acres_traded,
        bushels_fed,
        acres_planted,
    }
}

/// Run a whole term under the steward policy and print the accounting.
pub fn run(mut session: GameSession) -> Result<()> {
    info!("steward sweep starting with seed {}", session.seed());
    println!(
        "{}",
        format!("Steward sweep, seed {}", session.seed()).bold()
    );
    loop {
        let report = session.begin_year();
        if session.status().is_terminal() {
            break;
        }
        let price = session.roll_land_price();
        let decision = steward_decision(&session, price);
        debug!(
            "year {}: price {price}, trade {}, feed {}, plant {}",
            report.year, decision.acres_traded, decision.bushels_fed, decision.acres_planted
        );
        let events = session.advance_year(&decision)?;
        println!(
            "year {:>2}: pop {:>4}, acres {:>5}, store {:>6}, harvest {:>5}, starved {:>3}, rats {:>4}",
            report.year,
            session.state().population,
            session.state().acres,
            session.state().store_bushels(),
            events.harvest,
            events.starved,
            events.rat_loss
        );
    }
    let summary = session.final_summary();
    crate::narrate::ending(&summary);
    crate::narrate::final_accounting(&summary);
    Ok(())
}
