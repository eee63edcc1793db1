//! Points calculation for settled races.
//!
//! Pure and deterministic: the same results and picks always produce the
//! same delta. Applying that delta exactly once per settlement is the
//! caller's job (see [`crate::pool::Pool::settle`]).

use crate::feed::DriverResult;
use crate::pool::Pick;
use std::collections::HashMap;

/// Flat bonus for picking the race winner.
pub const WINNER_BONUS: i64 = 3;

/// Compute the score delta a set of picks earns from a finishing order.
///
/// Rank is positional in `results` (first entry finished first). A pick
/// whose driver appears at rank `r` among `n` finishers earns `n - r + 1`
/// points, so the winner earns `n` (plus [`WINNER_BONUS`]) and last place
/// earns 1. A pick whose driver is absent from the results earns nothing;
/// that is a normal outcome, not an error.
pub fn score(results: &[DriverResult], picks: &[Pick]) -> i64 {
    let positions: HashMap<&str, i64> = results
        .iter()
        .enumerate()
        .map(|(index, result)| (result.driver_id.as_str(), index as i64 + 1))
        .collect();
    let finisher_count = positions.len() as i64;

    let mut points = 0;
    for pick in picks {
        let Some(&rank) = positions.get(pick.driver_id.as_str()) else {
            continue;
        };
        points += finisher_count - rank + 1;
        if rank == 1 {
            points += WINNER_BONUS;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn results(driver_ids: &[&str]) -> Vec<DriverResult> {
        driver_ids
            .iter()
            .map(|id| DriverResult {
                driver_id: id.to_string(),
                full_name: None,
            })
            .collect()
    }

    fn pick(driver_id: &str) -> Pick {
        Pick::new(driver_id, driver_id.to_uppercase(), "race-1")
    }

    #[test]
    fn test_winner_pick_earns_total_plus_bonus() {
        let order = results(&["a", "b", "c", "d"]);
        assert_eq!(score(&order, &[pick("a")]), 7);
    }

    #[test]
    fn test_last_place_pick_earns_one() {
        let order = results(&["a", "b", "c", "d"]);
        assert_eq!(score(&order, &[pick("d")]), 1);
    }

    #[test]
    fn test_mid_field_pick() {
        let order = results(&["a", "b", "c", "d"]);
        assert_eq!(score(&order, &[pick("b")]), 3);
    }

    #[test]
    fn test_non_finisher_pick_earns_zero() {
        let order = results(&["a", "b", "c", "d"]);
        assert_eq!(score(&order, &[pick("z")]), 0);
    }

    #[test]
    fn test_score_is_additive_across_picks() {
        let order = results(&["a", "b", "c", "d"]);
        let picks = [pick("a"), pick("d"), pick("z")];

        let combined = score(&order, &picks);
        let separate: i64 = picks
            .iter()
            .map(|p| score(&order, std::slice::from_ref(p)))
            .sum();

        assert_eq!(combined, separate);
        assert_eq!(combined, 7 + 1);
    }

    #[test]
    fn test_identical_inputs_give_identical_delta() {
        let order = results(&["a", "b", "c"]);
        let picks = [pick("b"), pick("c")];

        let first = score(&order, &picks);
        let second = score(&order, &picks);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(score(&[], &[pick("a")]), 0);
        assert_eq!(score(&results(&["a"]), &[]), 0);
    }
}
