//! Main application module.
//!
//! `App` wires the feed client and the pool store together and implements
//! the user-facing actions: race status, registration, pick submission,
//! the leaderboard, and settlement. Each action runs to completion and
//! persists the pool before returning; there is no background work.

use crate::clock::{self, RaceState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::{Driver, FeedClient, FeedTransport, HttpTransport};
use crate::pool::{JsonStore, LeaderboardRow, Pick, Pool};
use chrono::{DateTime, FixedOffset, Utc};

/// Outcome of a pick submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick was recorded for the named race.
    Accepted { driver: String, race: String },
    /// The schedule could not be fetched; nothing was recorded.
    ScheduleUnavailable,
    /// The driver roster could not be fetched; nothing was recorded.
    RosterUnavailable,
    /// The season has no current or upcoming race to pick for.
    NoOpenCycle,
}

/// Outcome of a settlement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Results were applied; per-participant deltas in leaderboard order.
    Applied {
        race: String,
        deltas: Vec<(String, i64)>,
    },
    /// This race was settled on an earlier run.
    AlreadySettled { race: String },
    /// Today's race has not reached its start time yet.
    NotStarted { race: String },
    /// Today's race is underway but the feed has not finalized it.
    NotFinished { race: String },
    /// The race is final but the results document could not be fetched.
    ResultsUnavailable { race: String },
    /// No race today, so there is nothing to settle.
    NoRaceToday,
    /// The schedule could not be fetched.
    ScheduleUnavailable,
}

/// The main application.
pub struct App<T: FeedTransport = HttpTransport> {
    /// Feed client.
    feed: FeedClient<T>,
    /// Durable pool store.
    store: JsonStore,
    /// In-memory pool, write-through persisted after every mutation.
    pool: Pool,
}

impl App<HttpTransport> {
    /// Create an application from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let feed = FeedClient::new(config.feed.clone())?;
        let store = JsonStore::new(config.store.resolved_pool_path()?);
        Self::with_parts(feed, store)
    }
}

impl<T: FeedTransport> App<T> {
    /// Create an application from already-built collaborators.
    pub fn with_parts(feed: FeedClient<T>, store: JsonStore) -> Result<Self> {
        let pool = store.load()?;
        Ok(Self { feed, store, pool })
    }

    /// The current pool state.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Resolve the season state against the current instant.
    ///
    /// `None` means the schedule was unavailable, which callers must
    /// present as such rather than as "no races".
    pub async fn race_status(&self) -> Option<RaceState> {
        self.race_status_at(Utc::now().fixed_offset()).await
    }

    /// Resolve the season state against an explicit instant.
    pub async fn race_status_at(&self, now: DateTime<FixedOffset>) -> Option<RaceState> {
        let schedule = self.feed.fetch_schedule().await?;
        Some(clock::resolve(&schedule, now))
    }

    /// Register a new participant and persist the pool.
    pub fn register(&mut self, name: &str) -> Result<()> {
        self.pool.register(name)?;
        self.store.save(&self.pool)?;
        tracing::info!(participant = name, "registered");
        Ok(())
    }

    /// Fetch the driver roster, if available.
    pub async fn drivers(&self) -> Option<Vec<Driver>> {
        self.feed.fetch_driver_list().await.map(|list| list.drivers)
    }

    /// Record a participant's pick for the current race cycle.
    pub async fn submit_pick(&mut self, name: &str, driver_query: &str) -> Result<PickOutcome> {
        self.submit_pick_at(name, driver_query, Utc::now().fixed_offset())
            .await
    }

    /// Record a pick, resolving the race cycle against an explicit instant.
    pub async fn submit_pick_at(
        &mut self,
        name: &str,
        driver_query: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<PickOutcome> {
        if !self.pool.participants.contains_key(name) {
            return Err(Error::invalid_input(format!(
                "no participant named '{name}', register first"
            )));
        }

        let Some(state) = self.race_status_at(now).await else {
            return Ok(PickOutcome::ScheduleUnavailable);
        };
        let Some(race) = state.race().cloned() else {
            return Ok(PickOutcome::NoOpenCycle);
        };

        let Some(drivers) = self.drivers().await else {
            return Ok(PickOutcome::RosterUnavailable);
        };
        let driver = find_driver(&drivers, driver_query).ok_or_else(|| {
            Error::invalid_input(format!("no driver matching '{driver_query}' in the roster"))
        })?;

        self.pool
            .submit_pick(name, Pick::new(&driver.id, &driver.full_name, &race.id))?;
        self.store.save(&self.pool)?;
        tracing::info!(
            participant = name,
            driver = %driver.full_name,
            race = %race.id,
            "pick recorded"
        );

        Ok(PickOutcome::Accepted {
            driver: driver.full_name.clone(),
            race: race.name,
        })
    }

    /// The leaderboard, highest score first.
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        self.pool.leaderboard()
    }

    /// Attempt to settle today's race.
    pub async fn settle(&mut self) -> Result<SettleOutcome> {
        self.settle_at(Utc::now().fixed_offset()).await
    }

    /// Attempt settlement against an explicit instant.
    ///
    /// Only a race that is in progress by date, past its start time, and
    /// marked final in the schedule is eligible. A race already in the
    /// settled set is never scored again.
    pub async fn settle_at(&mut self, now: DateTime<FixedOffset>) -> Result<SettleOutcome> {
        let Some(state) = self.race_status_at(now).await else {
            return Ok(SettleOutcome::ScheduleUnavailable);
        };
        let RaceState::InProgress { race, start } = state else {
            return Ok(SettleOutcome::NoRaceToday);
        };

        if self.pool.is_settled(&race.id) {
            return Ok(SettleOutcome::AlreadySettled { race: race.name });
        }
        if start > now {
            return Ok(SettleOutcome::NotStarted { race: race.name });
        }
        if race.results.is_none() {
            // Once today rolls over this race stops resolving as
            // InProgress, so if the feed finalizes it late the scores are
            // never applied. Surface that loudly instead of hiding it.
            tracing::warn!(
                race = %race.id,
                "race not final in schedule; if it stays that way past midnight it will never settle"
            );
            return Ok(SettleOutcome::NotFinished { race: race.name });
        }

        let order = match self.feed.fetch_race_results(&race.id).await {
            Some(document) => match document.finishing_order() {
                Some(order) if !order.is_empty() => order.to_vec(),
                _ => {
                    tracing::warn!(race = %race.id, "results document carried no finishing order");
                    return Ok(SettleOutcome::ResultsUnavailable { race: race.name });
                }
            },
            None => return Ok(SettleOutcome::ResultsUnavailable { race: race.name }),
        };

        let deltas = self.pool.settle(&race.id, &order)?;
        self.store.save(&self.pool)?;
        tracing::info!(race = %race.id, participants = deltas.len(), "race settled");

        Ok(SettleOutcome::Applied {
            race: race.name,
            deltas,
        })
    }
}

/// Match a roster entry by id or by case-insensitive full name.
fn find_driver<'a>(drivers: &'a [Driver], query: &str) -> Option<&'a Driver> {
    drivers
        .iter()
        .find(|driver| driver.id == query || driver.full_name.eq_ignore_ascii_case(query))
}
