//! Wire types for the race data feed.
//!
//! Only the fields the pool actually consumes are modeled; everything else
//! in the feed documents is ignored during deserialization.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Season race schedule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A grouping of one or more races (a race weekend).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub races: Vec<Race>,
}

/// A single race within an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: String,
    pub name: String,
    /// Scheduled start as an RFC 3339 timestamp in the feed's own offset.
    /// Kept raw so a malformed value can be reported instead of failing
    /// the whole document.
    #[serde(default)]
    pub scheduled: Option<String>,
    /// Present once the feed has finalized the race.
    #[serde(default)]
    pub results: Option<Vec<DriverResult>>,
}

impl Race {
    /// Parse the scheduled start time, if present and well formed.
    pub fn start_time(&self) -> Option<Result<DateTime<FixedOffset>, chrono::ParseError>> {
        self.scheduled
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
    }
}

/// One entry of a results list. Finishing rank is positional: the first
/// entry finished first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResult {
    pub driver_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Race results document: `races[0].results` holds the finishing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsDocument {
    #[serde(default)]
    pub races: Vec<RaceResults>,
}

impl ResultsDocument {
    /// The finishing order of the first (and only) race in the document.
    pub fn finishing_order(&self) -> Option<&[DriverResult]> {
        self.races.first().map(|race| race.results.as_slice())
    }
}

/// Results for a single race inside a [`ResultsDocument`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResults {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub results: Vec<DriverResult>,
}

/// Driver roster document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverList {
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

/// One roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schedule_deserializes_partial_document() {
        let doc = serde_json::json!({
            "season": {"year": 2025},
            "events": [{
                "id": "ev-1",
                "name": "Daytona Weekend",
                "races": [{
                    "id": "race-1",
                    "name": "Daytona 500",
                    "scheduled": "2025-02-16T19:30:00+00:00",
                    "laps": 200
                }]
            }]
        });
        let schedule: Schedule = serde_json::from_value(doc).unwrap();
        assert_eq!(schedule.events.len(), 1);
        let race = &schedule.events[0].races[0];
        assert_eq!(race.id, "race-1");
        assert!(race.results.is_none());
        assert!(race.start_time().unwrap().is_ok());
    }

    #[test]
    fn test_malformed_scheduled_is_reported_not_dropped() {
        let race = Race {
            id: "race-2".to_string(),
            name: "Bad Clock 400".to_string(),
            scheduled: Some("next sunday".to_string()),
            results: None,
        };
        assert!(race.start_time().unwrap().is_err());
    }

    #[test]
    fn test_results_document_finishing_order() {
        let doc = serde_json::json!({
            "races": [{
                "id": "race-1",
                "results": [
                    {"driver_id": "a", "full_name": "Driver A"},
                    {"driver_id": "b"}
                ]
            }]
        });
        let results: ResultsDocument = serde_json::from_value(doc).unwrap();
        let order = results.finishing_order().unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].driver_id, "a");
    }
}
