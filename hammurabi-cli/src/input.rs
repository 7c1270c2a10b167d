//! Prompt loops collecting and validating the player's yearly decisions.
//!
//! Every prompt re-asks until the answer passes the validator, so the core
//! simulator only ever sees decisions that satisfy its preconditions.
use anyhow::{Result, bail};
use std::io::{BufRead, Write};

use hammurabi_game::{
    Decision, DecisionError, GameConfig, GameState, validate_feed, validate_plant, validate_trade,
};

/// Interactive decision collector over any line-oriented input.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the three classic prompts and return a fully validated decision.
    pub fn collect_decision(&mut self, state: &GameState, cfg: &GameConfig) -> Result<Decision> {
        let acres_traded = self.prompt_trade(state)?;
        let bushels_fed = self.prompt_feed(state, cfg, acres_traded)?;
        let acres_planted = self.prompt_plant(state, cfg, acres_traded, bushels_fed)?;
        Ok(Decision {
            acres_traded,
            bushels_fed,
            acres_planted,
        })
    }

    fn prompt_trade(&mut self, state: &GameState) -> Result<i64> {
        loop {
            let bought = self.read_number("How many acres do you wish to buy? ")?;
            if bought < 0 {
                continue;
            }
            if bought > 0 {
                match validate_trade(state, bought) {
                    Ok(()) => return Ok(bought),
                    Err(err) => self.nag(&err)?,
                }
                continue;
            }
            // Buying nothing opens the option to sell instead.
            loop {
                let sold = self.read_number("How many acres do you wish to sell? ")?;
                if sold < 0 {
                    continue;
                }
                match validate_trade(state, -sold) {
                    Ok(()) => return Ok(-sold),
                    Err(err) => self.nag(&err)?,
                }
            }
        }
    }

    fn prompt_feed(&mut self, state: &GameState, cfg: &GameConfig, acres_traded: i64) -> Result<u32> {
        let prompt = format!(
            "How many bushels do you wish to feed your people? ({} per person) ",
            cfg.feed_per_person
        );
        loop {
            let answer = self.read_number(&prompt)?;
            let Ok(fed) = u32::try_from(answer) else {
                continue;
            };
            match validate_feed(state, acres_traded, fed) {
                Ok(()) => return Ok(fed),
                Err(err) => self.nag(&err)?,
            }
        }
    }

    fn prompt_plant(
        &mut self,
        state: &GameState,
        cfg: &GameConfig,
        acres_traded: i64,
        bushels_fed: u32,
    ) -> Result<u32> {
        let prompt = format!(
            "How many acres do you wish to plant with seed? ({} bushels per acre, {} acres per person) ",
            cfg.seed_per_acre, cfg.workforce_per_person
        );
        loop {
            let answer = self.read_number(&prompt)?;
            let Ok(planted) = u32::try_from(answer) else {
                continue;
            };
            match validate_plant(state, cfg, acres_traded, bushels_fed, planted) {
                Ok(()) => return Ok(planted),
                Err(err) => self.nag(&err)?,
            }
        }
    }

    fn read_number(&mut self, prompt: &str) -> Result<i64> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input closed before the decision was complete");
            }
            if let Ok(value) = line.trim().parse::<i64>() {
                return Ok(value);
            }
        }
    }

    fn nag(&mut self, err: &DecisionError) -> Result<()> {
        let flavor = match err {
            DecisionError::LandPurchaseCost { store, .. }
            | DecisionError::FeedExceedsStore { store, .. }
            | DecisionError::SeedExceedsStore { store, .. } => {
                format!("Hammurabi: Think again. You have only\n{store} bushels of grain. Now then,")
            }
            DecisionError::WorkforceExceeded { population, .. } => format!(
                "Hammurabi: Think again. You have only\n{population} people to tend the fields. Now then,"
            ),
            DecisionError::LandSaleAcres { owned, .. }
            | DecisionError::PlantExceedsAcres { owned, .. } => {
                format!("Hammurabi: Think again. The city owns only\n{owned} acres. Now then,")
            }
        };
        writeln!(self.output, "{flavor}")?;
        Ok(())
    }
}
