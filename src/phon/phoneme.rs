//! A [`Phoneme`]: a single speech sound modeled as a set of articulatory features.

use std::collections::BTreeSet;
use std::fmt;

use crate::phon::feature::{Feature, FeatureCategory, FeatureTable};

/// A speech sound: a set of [`Feature`]s plus an optional IPA glyph.
///
/// Feature storage is a `BTreeSet` ordered by `Feature::index`, which keeps
/// `name`/`representation` derivation and matrix-key iteration deterministic,
/// and replaces per-category attribute spraying with on-demand accessors over
/// a fixed `FeatureCategory` schema.
#[derive(Debug, Clone)]
pub struct Phoneme {
    features: BTreeSet<Feature>,
    pub glyph: Option<String>,
    name: String,
}

impl Phoneme {
    pub fn new(features: BTreeSet<Feature>, glyph: Option<String>) -> Self {
        let name = Self::compute_name(&features);
        Phoneme { features, glyph, name }
    }

    pub fn empty(table: &FeatureTable) -> Self {
        let mut set = BTreeSet::new();
        set.insert(table.empty_feature().clone());
        Phoneme::new(set, None)
    }

    fn compute_name(features: &BTreeSet<Feature>) -> String {
        let mut parts = Vec::with_capacity(FeatureCategory::ORDER.len());
        for category in FeatureCategory::ORDER {
            let names: Vec<&str> = features
                .iter()
                .filter(|f| f.category == category)
                .map(|f| f.name.as_str())
                .collect();
            if !names.is_empty() {
                parts.push(names.join(" "));
            }
        }
        parts.join(" ")
    }

    /// Recompute the derived `name`. Call after any mutation performed with `defer = true`.
    pub fn recompute(&mut self) {
        self.name = Self::compute_name(&self.features);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn representation(&self) -> &str {
        self.glyph.as_deref().unwrap_or("")
    }

    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }

    /// All features of a given category, in ascending index order.
    pub fn by_category(&self, category: FeatureCategory) -> Vec<&Feature> {
        self.features.iter().filter(|f| f.category == category).collect()
    }

    /// The lowest-index feature of `category`, or the empty sentinel if none.
    pub fn primary(&self, category: FeatureCategory, empty: &Feature) -> Feature {
        self.features
            .iter()
            .filter(|f| f.category == category)
            .min_by_key(|f| f.index)
            .cloned()
            .unwrap_or_else(|| empty.clone())
    }

    pub fn places(&self) -> Vec<&Feature> {
        self.by_category(FeatureCategory::Place)
    }
    pub fn manners(&self) -> Vec<&Feature> {
        self.by_category(FeatureCategory::Manner)
    }

    pub fn contains(&self, feature: &Feature) -> bool {
        self.features.contains(feature)
    }

    pub fn contains_all<'a>(&self, features: impl IntoIterator<Item = &'a Feature>) -> bool {
        features.into_iter().all(|f| self.contains(f))
    }

    /// `self.features - other.features`
    pub fn difference(&self, other: &Phoneme) -> BTreeSet<Feature> {
        self.features.difference(&other.features).cloned().collect()
    }

    /// `self.features ∩ other.features`
    pub fn intersection(&self, other: &Phoneme) -> BTreeSet<Feature> {
        self.features.intersection(&other.features).cloned().collect()
    }

    /// `self.features ∪ other.features`
    pub fn union(&self, other: &Phoneme) -> BTreeSet<Feature> {
        self.features.union(&other.features).cloned().collect()
    }

    /// `self.features △ other.features`
    pub fn symmetric_difference(&self, other: &Phoneme) -> BTreeSet<Feature> {
        self.features.symmetric_difference(&other.features).cloned().collect()
    }

    pub fn add(&mut self, feature: Feature, defer: bool) {
        self.features.insert(feature);
        if !defer {
            self.recompute();
        }
    }

    pub fn remove(&mut self, feature: &Feature, defer: bool) {
        self.features.remove(feature);
        if !defer {
            self.recompute();
        }
    }

    pub fn replace(&mut self, from: &Feature, to: Feature, defer: bool) {
        if self.features.remove(from) {
            self.features.insert(to);
        }
        if !defer {
            self.recompute();
        }
    }

    /// Remove every existing `place` feature, then add `feature`.
    pub fn set_place(&mut self, feature: Feature, defer: bool) {
        let places: Vec<Feature> = self.places().into_iter().cloned().collect();
        for place in places {
            self.features.remove(&place);
        }
        self.features.insert(feature);
        if !defer {
            self.recompute();
        }
    }

    pub fn is_vowel(&self, table: &FeatureTable, vowel_manners: &[String]) -> bool {
        vowel_manners.iter().any(|code| {
            table.try_get(code).map(|f| self.contains(f)).unwrap_or(false)
        })
    }

    /// Rule-driven place advancement. `advance_rules` maps place code ->
    /// replacement place code for the default branch.
    pub fn advance(&mut self, table: &FeatureTable, advance_rules: &std::collections::HashMap<String, String>, vowel_manners: &[String], defer: bool) {
        let places: Vec<Feature> = self.places().into_iter().cloned().collect();
        let is_vowel = self.is_vowel(table, vowel_manners);
        for place in &places {
            if place.code == "PA" {
                self.add(table.get("AL").clone(), true);
            } else if place.code == "NE" && is_vowel {
                self.add(table.get("PZ").clone(), true);
            } else if place.code == "VE" && is_vowel {
                self.add(table.get("VZ").clone(), true);
                self.replace(place, table.get("NE").clone(), true);
            } else if let Some(target_code) = advance_rules.get(&place.code) {
                let target = table.get(target_code).clone();
                self.replace(place, target, true);
            }
        }
        if !defer {
            self.recompute();
        }
    }

    fn apply_rule_table(
        &mut self,
        table: &FeatureTable,
        rules: &std::collections::HashMap<String, String>,
        category: FeatureCategory,
        defer: bool,
    ) {
        let members: Vec<Feature> = self.by_category(category).into_iter().cloned().collect();
        for member in &members {
            if let Some(target_code) = rules.get(&member.code) {
                let target = table.get(target_code).clone();
                self.replace(member, target, true);
            }
        }
        if !defer {
            self.recompute();
        }
    }

    pub fn lower(&mut self, table: &FeatureTable, lower_rules: &std::collections::HashMap<String, String>, defer: bool) {
        self.apply_rule_table(table, lower_rules, FeatureCategory::Manner, defer);
    }

    pub fn upper(&mut self, table: &FeatureTable, upper_rules: &std::collections::HashMap<String, String>, defer: bool) {
        self.apply_rule_table(table, upper_rules, FeatureCategory::Manner, defer);
    }

    pub fn dentalize(&mut self, table: &FeatureTable, dentalize_rules: &std::collections::HashMap<String, String>, defer: bool) {
        self.apply_rule_table(table, dentalize_rules, FeatureCategory::Place, defer);
    }
}

impl PartialEq for Phoneme {
    fn eq(&self, other: &Self) -> bool {
        self.features == other.features
    }
}
impl Eq for Phoneme {}

impl std::hash::Hash for Phoneme {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Hash the ordered tuple of feature codes, not the derived display
        // name, to avoid name-collision-driven hash collisions.
        for feature in &self.features {
            feature.code.hash(state);
        }
    }
}

impl Ord for Phoneme {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}
impl PartialOrd for Phoneme {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.representation())
    }
}
