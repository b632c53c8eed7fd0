// Historical workout analytics: one-rep-max estimation, personal
// records, and per-session progression series. Everything in this module
// is pure and total; malformed input degrades to zero values rather than
// errors, matching the behavior callers rely on for summary cards.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use itertools::Itertools;

/// Brzycki formula constants: estimated 1RM = weight / (1.0278 - 0.0278 * reps)
const BRZYCKI_BASE: f64 = 1.0278;
const BRZYCKI_PER_REP: f64 = 0.0278;

/// Historical per-set data for one logged exercise. The aggregation
/// functions consume history through this seam so they stay decoupled
/// from the persistence-facing record types.
pub trait SetHistory {
    fn reps_per_set(&self) -> &[u32];
    fn weights_per_set(&self) -> &[f64];
    fn recorded_at(&self) -> DateTime<Utc>;
}

/// Estimate a one-rep max from a single set using the Brzycki formula,
/// rounded to the nearest whole number.
///
/// Degenerate inputs return 0: zero reps, non-positive weight, and rep
/// counts high enough (>= 37) to drive the Brzycki denominator to zero
/// or below. A single rep is definitionally the 1RM and bypasses the
/// formula.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 0 || weight <= 0.0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }

    let denominator = BRZYCKI_BASE - BRZYCKI_PER_REP * f64::from(reps);
    if denominator <= 0.0 {
        return 0.0;
    }
    (weight / denominator).round()
}

/// Maximum of the strictly positive weights in a set list. Zero weights
/// mean "set not performed" and are excluded; an empty or all-zero list
/// yields 0.
pub fn find_max_weight(weights_per_set: &[f64]) -> f64 {
    weights_per_set
        .iter()
        .copied()
        .filter(|w| *w > 0.0)
        .fold(0.0, f64::max)
}

/// Maximum of the strictly positive rep counts in a set list. An empty
/// or all-zero list yields 0.
pub fn find_max_reps(reps_per_set: &[u32]) -> u32 {
    reps_per_set
        .iter()
        .copied()
        .filter(|r| *r > 0)
        .max()
        .unwrap_or(0)
}

/// Best estimated 1RM across all sets of one exercise performance.
///
/// Returns 0 when the rep and weight lists differ in length (shape
/// mismatch is absorbed, not raised) or when no set has both positive
/// reps and positive weight.
pub fn best_one_rep_max(reps_per_set: &[u32], weights_per_set: &[f64]) -> f64 {
    if reps_per_set.len() != weights_per_set.len() {
        return 0.0;
    }

    let mut best = 0.0;
    for (&reps, &weight) in reps_per_set.iter().zip(weights_per_set) {
        if reps > 0 && weight > 0.0 {
            let one_rm = estimate_one_rep_max(weight, reps);
            if one_rm > best {
                best = one_rm;
            }
        }
    }
    best
}

/// Aggregate personal records for one exercise, recomputed on demand
/// from history and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalRecords {
    /// Heaviest weight used in any set
    pub max_weight: f64,
    /// Highest rep count in any set
    pub max_reps: u32,
    /// Best estimated 1RM across all sets
    pub best_one_rep_max: f64,
    /// Number of logged sets across all sessions
    pub total_sets: usize,
    /// Sum of reps * weight over every set
    pub total_volume: f64,
}

/// Fold a full exercise history into its personal records.
///
/// Maxima ignore zero-valued sets through the per-entry functions, but
/// volume counts every set: a zero rep count or zero weight contributes
/// nothing. Total sets counts logged sets, performed or not, matching
/// what the history screens display.
pub fn personal_records<H: SetHistory>(entries: &[H]) -> PersonalRecords {
    let mut records = PersonalRecords::default();

    for entry in entries {
        let reps_per_set = entry.reps_per_set();
        let weights_per_set = entry.weights_per_set();

        let weight = find_max_weight(weights_per_set);
        let reps = find_max_reps(reps_per_set);
        let one_rm = best_one_rep_max(reps_per_set, weights_per_set);

        if weight > records.max_weight {
            records.max_weight = weight;
        }
        if reps > records.max_reps {
            records.max_reps = reps;
        }
        if one_rm > records.best_one_rep_max {
            records.best_one_rep_max = one_rm;
        }

        records.total_sets += reps_per_set.len();
        for (i, &r) in reps_per_set.iter().enumerate() {
            records.total_volume +=
                f64::from(r) * weights_per_set.get(i).copied().unwrap_or(0.0);
        }
    }

    records
}

/// One point in a per-session progression series.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionPoint {
    /// Session index, 0 = oldest
    pub index: usize,
    /// When the session was logged
    pub recorded_at: DateTime<Utc>,
    pub value: f64,
}

/// Max weight per session, oldest first. Input is expected newest-first,
/// the order history queries return it in.
pub fn weight_progression<H: SetHistory>(entries: &[H]) -> Vec<ProgressionPoint> {
    entries
        .iter()
        .rev()
        .enumerate()
        .map(|(index, entry)| ProgressionPoint {
            index,
            recorded_at: entry.recorded_at(),
            value: find_max_weight(entry.weights_per_set()),
        })
        .collect()
}

/// Logged set count per session, oldest first. Input is expected
/// newest-first.
pub fn sets_progression<H: SetHistory>(entries: &[H]) -> Vec<ProgressionPoint> {
    entries
        .iter()
        .rev()
        .enumerate()
        .map(|(index, entry)| ProgressionPoint {
            index,
            recorded_at: entry.recorded_at(),
            value: entry.reps_per_set().len() as f64,
        })
        .collect()
}

/// Group items by a derived key. Members of a group keep their input
/// relative order; the iteration order of the groups themselves is not
/// guaranteed.
pub fn group_by<T, K, F>(items: Vec<T>, key_fn: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    items
        .into_iter()
        .map(|item| (key_fn(&item), item))
        .into_group_map()
}

/// Sorted copy of a list, ordered case-insensitively by a derived string
/// key. The input is never mutated.
pub fn sort_alphabetically<T, F>(items: &[T], key_fn: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    items
        .iter()
        .cloned()
        .sorted_by(|a, b| key_fn(a).to_lowercase().cmp(&key_fn(b).to_lowercase()))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_one_rep_max_is_finite_and_non_negative(
            weight in -500.0f64..2000.0,
            reps in 0u32..200
        ) {
            let one_rm = estimate_one_rep_max(weight, reps);
            prop_assert!(one_rm.is_finite());
            prop_assert!(one_rm >= 0.0);
        }

        #[test]
        fn prop_one_rep_max_at_least_the_weight_in_formula_range(
            weight in 1.0f64..1000.0,
            reps in 1u32..37
        ) {
            // More reps at a given weight never lowers the estimate below
            // the weight itself
            let one_rm = estimate_one_rep_max(weight, reps);
            prop_assert!(one_rm >= weight.floor());
        }

        #[test]
        fn prop_find_max_weight_matches_filtered_max(
            weights in prop::collection::vec(0.0f64..1000.0, 0..20)
        ) {
            let expected = weights
                .iter()
                .copied()
                .filter(|w| *w > 0.0)
                .fold(0.0, f64::max);
            prop_assert_eq!(find_max_weight(&weights), expected);
        }

        #[test]
        fn prop_best_one_rep_max_never_exceeds_single_set_estimates(
            sets in prop::collection::vec((0u32..40, 0.0f64..500.0), 1..10)
        ) {
            let reps: Vec<u32> = sets.iter().map(|(r, _)| *r).collect();
            let weights: Vec<f64> = sets.iter().map(|(_, w)| *w).collect();

            let best = best_one_rep_max(&reps, &weights);
            let max_single = sets
                .iter()
                .map(|(r, w)| estimate_one_rep_max(*w, *r))
                .fold(0.0, f64::max);
            prop_assert_eq!(best, max_single);
        }
    }
}
