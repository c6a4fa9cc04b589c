//! Phoneme-to-phoneme distance: an assignment problem over the symmetric
//! difference of two phonemes' feature sets.

use crate::distance::assignment::{self, Assignment};
use crate::phon::feature::FeatureTable;
use crate::phon::phoneme::Phoneme;

/// Tunes how the distance oracle behaves when a feature pair has no entry.
///
/// Feeding a disallowed cost straight into the assignment matrix for any
/// missing pair can make an entire row infeasible. `max_pair_cost` gives
/// every pair a finite fallback so a handful of untabulated feature pairs
/// degrade the distance rather than aborting the whole phoneme comparison.
#[derive(Debug, Clone, Copy)]
pub struct PhonemeDistanceConfig {
    pub max_pair_cost: f64,
}

impl Default for PhonemeDistanceConfig {
    fn default() -> Self {
        PhonemeDistanceConfig { max_pair_cost: 10.0 }
    }
}

/// The cost of turning `a` into `b`: zero if they're identical, otherwise the
/// minimum-cost assignment between their symmetric-difference feature sets,
/// padded with the empty sentinel feature so both sides are equal length.
///
/// Every cell the oracle has no entry for is fed into the solver as
/// `f64::INFINITY` (disallowed), so the assignment genuinely routes around
/// untabulated pairs when a cheaper feasible matching exists. Only when an
/// entire row is disallowed — the assignment problem itself is infeasible —
/// is the failure logged and `config.max_pair_cost` substituted for the whole
/// comparison.
pub fn distance(a: &Phoneme, b: &Phoneme, table: &FeatureTable, config: &PhonemeDistanceConfig) -> f64 {
    if a == b {
        return 0.0;
    }
    let only_a: Vec<_> = a.difference(b).into_iter().collect();
    let only_b: Vec<_> = b.difference(a).into_iter().collect();

    let empty = table.empty_feature().clone();
    let mut list_a = only_a.clone();
    list_a.extend(std::iter::repeat(empty.clone()).take(only_b.len()));
    let mut list_b = only_b.clone();
    list_b.extend(std::iter::repeat(empty).take(only_a.len()));

    if list_a.is_empty() {
        return 0.0;
    }

    let cost: Vec<Vec<f64>> = list_a
        .iter()
        .map(|f1| list_b.iter().map(|f2| table.distance_to(f1, f2, f64::INFINITY)).collect())
        .collect();

    match assignment::solve(&cost) {
        Ok(Assignment { total, .. }) => total,
        Err(err) => {
            tracing::warn!(row = err.row, "phoneme assignment infeasible, falling back to max_pair_cost");
            config.max_pair_cost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    fn table() -> FeatureTable {
        let mut info = HashMap::new();
        info.insert("AL".to_string(), (1, "Alveolar".to_string(), "place".to_string()));
        info.insert("VE".to_string(), (2, "Velar".to_string(), "place".to_string()));
        info.insert("PL".to_string(), (30, "Plosive".to_string(), "manner".to_string()));
        let mut dist = HashMap::new();
        dist.insert("AL,VE".to_string(), 1.0);
        dist.insert("VE,AL".to_string(), 1.0);
        dist.insert("AL,X".to_string(), 2.0);
        dist.insert("X,AL".to_string(), 2.0);
        dist.insert("VE,X".to_string(), 2.0);
        dist.insert("X,VE".to_string(), 2.0);
        FeatureTable::new(&info, &dist)
    }

    #[test]
    fn identical_phonemes_have_zero_distance() {
        let table = table();
        let mut set = BTreeSet::new();
        set.insert(table.get("AL").clone());
        set.insert(table.get("PL").clone());
        let a = Phoneme::new(set.clone(), Some("t".into()));
        let b = Phoneme::new(set, Some("t2".into()));
        assert_eq!(distance(&a, &b, &table, &PhonemeDistanceConfig::default()), 0.0);
    }

    #[test]
    fn differing_place_costs_the_tabulated_distance() {
        let table = table();
        let mut set_a = BTreeSet::new();
        set_a.insert(table.get("AL").clone());
        set_a.insert(table.get("PL").clone());
        let mut set_b = BTreeSet::new();
        set_b.insert(table.get("VE").clone());
        set_b.insert(table.get("PL").clone());
        let a = Phoneme::new(set_a, Some("t".into()));
        let b = Phoneme::new(set_b, Some("k".into()));
        // The assignment pads each side with an extra empty-feature slot, so
        // the 2x2 cost matrix also weighs AL<->X and VE<->X against the
        // direct AL<->VE pairing. `X,X` is untabulated (disallowed), which
        // rules out the diagonal match and forces the cheaper crossed one:
        // AL->X (2.0) plus X->VE (2.0).
        assert_eq!(distance(&a, &b, &table, &PhonemeDistanceConfig::default()), 4.0);
    }
}
