//! Narrative rendering of reports, events, and the final accounting.
use colored::Colorize;

use hammurabi_game::{
    FinalSummary, GameConfig, PriceLevel, RuinCause, TermStatus, YearEvents, YearReport,
};

/// Open-of-year report: last year's toll and the city ledger.
pub fn year_report(report: &YearReport) {
    println!();
    println!("{}", "Hammurabi: I beg to report to you,".bold());
    println!(
        "in year {}, {} people starved, {} came to the city.",
        report.year, report.starved, report.immigrants
    );
    if report.plague_deaths > 0 {
        println!(
            "{}",
            format!(
                "A horrible plague struck! {} people died.",
                report.plague_deaths
            )
            .red()
            .bold()
        );
    }
    println!("Population is now {}.", report.population);
    println!("The city now owns {} acres.", report.acres);
    println!(
        "You harvested {} bushels per acre. ({})",
        report.grain_yield,
        report.yield_quality.as_str().cyan()
    );
    println!("Rats ate {} bushels.", report.rat_loss);
    println!("You now have {} bushels in store.", report.store);
    println!();
}

/// Announce this year's land market.
pub fn land_price(price: u32, cfg: &GameConfig) {
    let level = PriceLevel::classify(
        f64::from(price),
        f64::from(cfg.land_price_base),
        f64::from(cfg.land_price_base + cfg.land_price_spread),
    );
    println!(
        "Land is trading at {} bushels per acre. ({})",
        price,
        level.as_str().yellow()
    );
}

/// Narrate the outcome of the simulated year.
pub fn year_events(events: &YearEvents, store_now: i64) {
    println!(
        "{} acres were tended, costing {} bushels of grain.",
        events.acres_planted, events.seed_spent
    );
    println!(
        "Yield was {} bushels per acre. Harvested {} bushels of grain.",
        events.grain_yield, events.harvest
    );
    println!(
        "Rats ate {} bushels of grain. Store now has {} bushels.",
        events.rat_loss, store_now
    );
}

/// Closing narration for the way the term ended.
pub fn ending(summary: &FinalSummary) {
    println!();
    match summary.status {
        TermStatus::Impeached(RuinCause::MassStarvation) => {
            println!("{}", "You starved too many people in one year!".red().bold());
            println!("Due to this extreme mismanagement you have not only");
            println!("been impeached and thrown out of office but you have");
            println!("also been declared national flink!");
        }
        TermStatus::Impeached(RuinCause::Depopulation) => {
            println!("{}", "The city stands empty.".red().bold());
            println!("With nobody left to govern, your term is over.");
        }
        TermStatus::Completed => {
            println!("{}", "Well done!".green().bold());
            println!(
                "You've admirably served your {} year period.",
                summary.years
            );
        }
        TermStatus::Playing => {}
    }
}

/// End-of-term cumulative accounting.
pub fn final_accounting(summary: &FinalSummary) {
    let stats = &summary.stats;
    println!();
    println!("In your {} years in office:", summary.years);
    println!("You starved {} people to death.", stats.total_starved);
    println!(
        "You survived {} plagues and lost {} people.",
        stats.plagues, stats.plague_deaths
    );
    println!("Harvested {} bushels of grain.", stats.total_harvested);
    println!("Rats ate {} bushels of your grain.", stats.total_rat_loss);
    println!("(seed {})", summary.seed);
}
