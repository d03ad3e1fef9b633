//! Agent Binary
//!
//! Plays scripted blackjack tables through the session controller
//! and prints each game's report.

use clap::Parser;
use colored::Colorize;
use robojack::dealer::*;
use robojack::session::Config;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Play scripted blackjack tables", long_about = None)]
struct Args {
    /// Table to play: stay, split, blackjack, plain. Plays all when omitted.
    #[arg(short, long)]
    scenario: Option<String>,
    /// Main bet per game.
    #[arg(short, long, default_value_t = robojack::BET_AMOUNT)]
    bet: robojack::Chips,
    /// Side bet per game.
    #[arg(long, default_value_t = robojack::SIDE_AMOUNT)]
    side: robojack::Chips,
    /// Seconds to wait on any phase before giving up.
    #[arg(short, long, default_value_t = robojack::GATE_DEADLINE)]
    deadline: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    robojack::log();
    let args = Args::parse();
    let config = Config::default()
        .with_bet(args.bet, args.side)
        .with_deadline(Duration::from_secs(args.deadline));
    let scenarios = match args.scenario.as_deref() {
        None => Scenario::all().to_vec(),
        Some(name) => vec![
            Scenario::named(name).ok_or_else(|| anyhow::anyhow!("no such table: {}", name))?,
        ],
    };
    let reports = futures::future::try_join_all(
        scenarios.into_iter().map(|scenario| play(scenario, config)),
    )
    .await?;
    let mut misses = 0;
    for report in reports {
        println!("{}", serde_json::to_string_pretty(&report)?);
        let total = format!("{:+}", report.summary.total);
        match report.is_expected() {
            true => println!("{:<10}{}", report.scenario, total.green()),
            false => {
                misses += 1;
                println!("{:<10}{} (expected {:+})", report.scenario, total.red(), report.expected)
            }
        }
    }
    match misses {
        0 => Ok(()),
        n => Err(anyhow::anyhow!("{} tables ended off script", n)),
    }
}
