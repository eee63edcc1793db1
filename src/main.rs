//! Pitpool - a fantasy motorsport prediction pool.
//!
//! Thin CLI shell: every command loads the pool, performs one action
//! through [`App`], and prints the outcome. "Data unavailable" states are
//! informational text, never a crash.

use clap::Parser;
use pitpool::app::{PickOutcome, SettleOutcome};
use pitpool::cli::{Cli, Commands};
use pitpool::clock::RaceState;
use pitpool::{App, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitpool=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    let mut app = App::new(config)?;

    match cli.command {
        Commands::Status => match app.race_status().await {
            Some(RaceState::InProgress { race, start }) => {
                println!("RACE IN PROGRESS: {}", race.name);
                println!("Scheduled start: {}", start.format("%I:%M%p %m-%d-%Y"));
            }
            Some(RaceState::Upcoming { race, start }) => {
                println!("Upcoming race: {}", race.name);
                println!("Scheduled start: {}", start.format("%I:%M%p %m-%d-%Y"));
            }
            Some(RaceState::Idle) => println!("No race today and none remaining on the schedule."),
            None => println!("Race schedule is unavailable right now, try again later."),
        },

        Commands::Register { name } => {
            app.register(&name)?;
            println!("Welcome to the pool, {name}!");
        }

        Commands::Pick { name, driver } => match app.submit_pick(&name, &driver).await? {
            PickOutcome::Accepted { driver, race } => {
                println!("{name} picked {driver} for {race}.");
            }
            PickOutcome::ScheduleUnavailable => {
                println!("Race schedule is unavailable right now, pick not recorded.");
            }
            PickOutcome::RosterUnavailable => {
                println!("Driver roster is unavailable right now, pick not recorded.");
            }
            PickOutcome::NoOpenCycle => {
                println!("The season has no current or upcoming race to pick for.");
            }
        },

        Commands::Drivers => match app.drivers().await {
            Some(drivers) => {
                for driver in drivers {
                    println!("{}  {}", driver.id, driver.full_name);
                }
            }
            None => println!("Driver roster is unavailable right now."),
        },

        Commands::Leaderboard => {
            let board = app.leaderboard();
            if board.is_empty() {
                println!("Nobody has registered yet.");
            }
            for row in board {
                let crown = if row.leader { " \u{1F451}" } else { "" };
                let last_pick = row.last_pick.as_deref().unwrap_or("None");
                println!(
                    "{}. {} - {} points{} | Last Pick: {}",
                    row.rank, row.name, row.score, crown, last_pick
                );
            }
        }

        Commands::Settle => match app.settle().await? {
            SettleOutcome::Applied { race, deltas } => {
                println!("Leaderboard updated with results of {race}:");
                for (name, delta) in deltas {
                    println!("  {name}: +{delta}");
                }
            }
            SettleOutcome::AlreadySettled { race } => {
                println!("{race} has already been settled.");
            }
            SettleOutcome::NotStarted { race } => {
                println!("{race} has not started yet.");
            }
            SettleOutcome::NotFinished { race } => {
                println!("{race} is still in progress, results cannot be fetched yet.");
            }
            SettleOutcome::ResultsUnavailable { race } => {
                println!("Results for {race} are not yet available, scores unchanged.");
            }
            SettleOutcome::NoRaceToday => {
                println!("No race today, nothing to settle.");
            }
            SettleOutcome::ScheduleUnavailable => {
                println!("Race schedule is unavailable right now, nothing settled.");
            }
        },
    }

    Ok(())
}
