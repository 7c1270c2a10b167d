//! Console front end for the Hammurabi city governance simulation.
mod auto;
mod input;
mod narrate;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::io::{BufReader, stdin, stdout};
use std::path::{Path, PathBuf};

use hammurabi_game::{GameConfig, GameSession};

#[derive(Debug, Parser)]
#[command(name = "hammurabi", version)]
#[command(about = "Try your hand at governing ancient Sumeria for a term of office")]
struct Args {
    /// Seed for the deterministic simulation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON tuning configuration overriding the classic balance
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play the scripted steward policy instead of prompting (QA sweeps)
    #[arg(long)]
    auto: bool,

    /// Disable colored narration
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let cfg = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("starting session with seed {seed}");
    let session = GameSession::with_config(seed, cfg).context("configuration rejected")?;

    if args.auto {
        return auto::run(session);
    }
    run_interactive(session)
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn run_interactive(mut session: GameSession) -> Result<()> {
    let cfg = session.config().clone();
    println!(
        "Try your hand at governing ancient Sumeria for a {} year term of office.",
        cfg.term_years
    );

    let stdin = stdin();
    let mut prompter = input::Prompter::new(BufReader::new(stdin.lock()), stdout());

    loop {
        let report = session.begin_year();
        narrate::year_report(&report);
        if session.status().is_terminal() {
            break;
        }

        let price = session.roll_land_price();
        narrate::land_price(price, &cfg);

        let decision = prompter.collect_decision(session.state(), &cfg)?;
        let events = session
            .advance_year(&decision)
            .context("validated decision rejected by the simulator")?;
        narrate::year_events(&events, session.state().store_bushels());
    }

    let summary = session.final_summary();
    narrate::ending(&summary);
    narrate::final_accounting(&summary);
    Ok(())
}
