//! Pool state: participants, their picks, and settlement bookkeeping.

mod store;

pub use store::JsonStore;

use crate::error::{Error, Result};
use crate::feed::DriverResult;
use crate::scoring;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A participant's driver selection for one race cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub driver_id: String,
    pub driver_name: String,
    /// The race this pick was submitted for.
    pub race_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl Pick {
    pub fn new(
        driver_id: impl Into<String>,
        driver_name: impl Into<String>,
        race_id: impl Into<String>,
    ) -> Self {
        Self {
            driver_id: driver_id.into(),
            driver_name: driver_name.into(),
            race_id: race_id.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// One pool member: cumulative score plus full pick history, most recent
/// last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub score: i64,
    pub picks: Vec<Pick>,
}

impl Participant {
    /// The participant's current pick, if any.
    pub fn last_pick(&self) -> Option<&Pick> {
        self.picks.last()
    }
}

/// One leaderboard line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score: i64,
    pub last_pick: Option<String>,
    /// Whether this row is tied for the top score.
    pub leader: bool,
}

/// The whole pool document: participants keyed by name, plus the set of
/// races whose results have already been applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    pub participants: BTreeMap<String, Participant>,
    /// Settlement guard: a race in this set is never scored again.
    pub settled_races: BTreeSet<String>,
}

impl Pool {
    /// Add a new participant with zero score and no picks.
    pub fn register(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("participant name cannot be empty"));
        }
        if self.participants.contains_key(name) {
            return Err(Error::invalid_input(format!(
                "participant '{name}' is already registered"
            )));
        }
        self.participants.insert(name.to_string(), Participant::default());
        Ok(())
    }

    /// Append a pick to a participant's history.
    pub fn submit_pick(&mut self, name: &str, pick: Pick) -> Result<()> {
        let participant = self
            .participants
            .get_mut(name)
            .ok_or_else(|| Error::invalid_input(format!("no participant named '{name}'")))?;
        participant.picks.push(pick);
        Ok(())
    }

    /// Whether a race's results have already been applied.
    pub fn is_settled(&self, race_id: &str) -> bool {
        self.settled_races.contains(race_id)
    }

    /// Apply a finishing order to every participant's picks for the given
    /// race and record the race as settled.
    ///
    /// Only picks submitted for `race_id` count; older cycles are never
    /// re-scored. Returns the per-participant deltas in leaderboard order.
    /// Settling an already-settled race is rejected so a double invocation
    /// cannot double-count.
    pub fn settle(&mut self, race_id: &str, results: &[DriverResult]) -> Result<Vec<(String, i64)>> {
        if self.is_settled(race_id) {
            return Err(Error::invalid_input(format!(
                "race '{race_id}' has already been settled"
            )));
        }

        let mut deltas = Vec::with_capacity(self.participants.len());
        for (name, participant) in &mut self.participants {
            let cycle_picks: Vec<Pick> = participant
                .picks
                .iter()
                .filter(|pick| pick.race_id == race_id)
                .cloned()
                .collect();
            let delta = scoring::score(results, &cycle_picks);
            participant.score += delta;
            deltas.push((name.clone(), delta));
        }

        self.settled_races.insert(race_id.to_string());
        Ok(deltas)
    }

    /// Participants ranked by score, highest first. Ties share the order
    /// they hold in the name-sorted map; every row tied for the top score
    /// is marked as a leader.
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        let mut entries: Vec<(&String, &Participant)> = self.participants.iter().collect();
        entries.sort_by_key(|(_, participant)| std::cmp::Reverse(participant.score));

        let top_score = entries.first().map(|(_, p)| p.score);
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, participant))| LeaderboardRow {
                rank: index + 1,
                name: name.clone(),
                score: participant.score,
                last_pick: participant.last_pick().map(|pick| pick.driver_name.clone()),
                leader: Some(participant.score) == top_score,
            })
            .collect()
    }
}
