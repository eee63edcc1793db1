//! Race clock: where the season stands relative to a reference instant.

use crate::feed::{Race, Schedule};
use chrono::{DateTime, FixedOffset};

/// Temporal state of the season. Derived from the schedule on demand,
/// never persisted.
#[derive(Debug, Clone)]
pub enum RaceState {
    /// A race is scheduled for today (in the feed's own offset).
    InProgress {
        race: Race,
        start: DateTime<FixedOffset>,
    },
    /// No race today; this is the next one coming up.
    Upcoming {
        race: Race,
        start: DateTime<FixedOffset>,
    },
    /// No race today and nothing left on the calendar.
    Idle,
}

impl RaceState {
    /// The race this state refers to, if any.
    pub fn race(&self) -> Option<&Race> {
        match self {
            Self::InProgress { race, .. } | Self::Upcoming { race, .. } => Some(race),
            Self::Idle => None,
        }
    }
}

/// Classify the schedule relative to `now`.
///
/// Scans every race of every event in document order. The first race whose
/// calendar date matches `now`'s wins outright (the feed carries at most
/// one same-day race per pool). Otherwise the earliest race starting
/// strictly after `now` is upcoming; equal start times keep the first one
/// encountered. All date arithmetic stays in the timestamps' own fixed
/// offset; the caller's local timezone never enters into it.
///
/// Races with a missing or unparseable `scheduled` value are skipped with
/// a diagnostic and the rest of the schedule still resolves.
pub fn resolve(schedule: &Schedule, now: DateTime<FixedOffset>) -> RaceState {
    let mut next: Option<(&Race, DateTime<FixedOffset>)> = None;

    for event in &schedule.events {
        for race in &event.races {
            let start = match race.start_time() {
                Some(Ok(start)) => start,
                Some(Err(e)) => {
                    tracing::warn!(
                        race = %race.id,
                        scheduled = race.scheduled.as_deref().unwrap_or_default(),
                        error = %e,
                        "race has unparseable start time, excluding from clock"
                    );
                    continue;
                }
                None => {
                    tracing::warn!(race = %race.id, "race has no start time, excluding from clock");
                    continue;
                }
            };

            if start.date_naive() == now.date_naive() {
                return RaceState::InProgress {
                    race: race.clone(),
                    start,
                };
            }

            if start > now && next.is_none_or(|(_, best)| start < best) {
                next = Some((race, start));
            }
        }
    }

    match next {
        Some((race, start)) => RaceState::Upcoming {
            race: race.clone(),
            start,
        },
        None => RaceState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Event;
    use pretty_assertions::assert_eq;

    fn race(id: &str, scheduled: Option<&str>) -> Race {
        Race {
            id: id.to_string(),
            name: format!("{id} 400"),
            scheduled: scheduled.map(str::to_string),
            results: None,
        }
    }

    fn schedule(races: Vec<Race>) -> Schedule {
        Schedule {
            events: vec![Event {
                id: "ev-1".to_string(),
                name: None,
                races,
            }],
        }
    }

    fn at(timestamp: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(timestamp).unwrap()
    }

    #[test]
    fn test_same_day_race_is_in_progress() {
        let schedule = schedule(vec![
            race("past", Some("2025-03-02T19:00:00+00:00")),
            race("today", Some("2025-03-09T20:00:00+00:00")),
            race("future", Some("2025-03-16T19:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-03-09T12:00:00+00:00"));
        match state {
            RaceState::InProgress { race, start } => {
                assert_eq!(race.id, "today");
                assert_eq!(start, at("2025-03-09T20:00:00+00:00"));
            }
            other => panic!("expected InProgress, got {other:?}"),
        }
    }

    #[test]
    fn test_same_day_wins_over_any_future_race() {
        // Even a race later today that already started counts as today's.
        let schedule = schedule(vec![
            race("soon", Some("2025-03-10T01:00:00+00:00")),
            race("today", Some("2025-03-09T02:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-03-09T23:00:00+00:00"));
        assert_eq!(state.race().unwrap().id, "today");
        assert!(matches!(state, RaceState::InProgress { .. }));
    }

    #[test]
    fn test_earliest_future_race_is_upcoming() {
        let schedule = schedule(vec![
            race("later", Some("2025-04-06T19:00:00+00:00")),
            race("sooner", Some("2025-03-23T19:00:00+00:00")),
            race("past", Some("2025-02-16T19:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-03-10T12:00:00+00:00"));
        match state {
            RaceState::Upcoming { race, start } => {
                assert_eq!(race.id, "sooner");
                assert_eq!(start, at("2025-03-23T19:00:00+00:00"));
            }
            other => panic!("expected Upcoming, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_start_times_keep_first_encountered() {
        let schedule = schedule(vec![
            race("first", Some("2025-03-23T19:00:00+00:00")),
            race("second", Some("2025-03-23T19:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-03-10T12:00:00+00:00"));
        assert_eq!(state.race().unwrap().id, "first");
    }

    #[test]
    fn test_only_past_races_is_idle() {
        let schedule = schedule(vec![
            race("one", Some("2025-02-16T19:00:00+00:00")),
            race("two", Some("2025-03-02T19:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-11-20T12:00:00+00:00"));
        assert!(matches!(state, RaceState::Idle));
    }

    #[test]
    fn test_malformed_race_is_skipped_not_fatal() {
        let schedule = schedule(vec![
            race("garbled", Some("sometime in march")),
            race("missing", None),
            race("good", Some("2025-03-23T19:00:00+00:00")),
        ]);

        let state = resolve(&schedule, at("2025-03-10T12:00:00+00:00"));
        assert_eq!(state.race().unwrap().id, "good");
    }

    #[test]
    fn test_today_is_the_feed_offset_date_not_utc() {
        // 2025-03-09T23:30:00-05:00 is 2025-03-10T04:30:00Z; the race's own
        // offset says March 9, and that is the date that counts.
        let schedule = schedule(vec![race("late", Some("2025-03-09T23:30:00-05:00"))]);

        let state = resolve(&schedule, at("2025-03-09T10:00:00-05:00"));
        assert!(matches!(state, RaceState::InProgress { .. }));
    }

    #[test]
    fn test_empty_schedule_is_idle() {
        let state = resolve(&Schedule::default(), at("2025-03-10T12:00:00+00:00"));
        assert!(matches!(state, RaceState::Idle));
    }
}
