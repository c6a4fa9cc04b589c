//! Phonological features: the atoms that [`crate::phon::phoneme::Phoneme`]s are built from.

use std::collections::HashMap;
use std::fmt;

/// The five articulatory dimensions a [`Feature`] can belong to, plus the
/// category-less sentinel used by the empty feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum FeatureCategory {
    Place,
    SecondaryPlace,
    Manner,
    SecondaryManner,
    Airflow,
    /// Only used by the empty sentinel feature (`code == "X"`).
    None,
}

impl FeatureCategory {
    fn from_str(s: &str) -> Self {
        match s {
            "place" => FeatureCategory::Place,
            "secondary_place" => FeatureCategory::SecondaryPlace,
            "manner" => FeatureCategory::Manner,
            "secondary_manner" => FeatureCategory::SecondaryManner,
            "airflow" => FeatureCategory::Airflow,
            _ => FeatureCategory::None,
        }
    }

    /// The fixed category ordering used to build `Phoneme::name`.
    pub const ORDER: [FeatureCategory; 5] = [
        FeatureCategory::Place,
        FeatureCategory::SecondaryPlace,
        FeatureCategory::Manner,
        FeatureCategory::SecondaryManner,
        FeatureCategory::Airflow,
    ];
}

/// A single articulatory property of a speech sound.
///
/// Equality and hashing are by `code` only; total order is by `index`.
#[derive(Debug, Clone)]
pub struct Feature {
    pub name: String,
    pub code: String,
    pub category: FeatureCategory,
    pub index: u32,
}

impl Feature {
    pub fn new(name: impl Into<String>, code: impl Into<String>, category: FeatureCategory, index: u32) -> Self {
        Feature { name: name.into(), code: code.into(), category, index }
    }

    /// The sentinel empty feature: `code = "X"`, `index = 0`, no category.
    pub fn empty() -> Self {
        Feature::new("", "X", FeatureCategory::None, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.code == "X"
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}
impl Eq for Feature {}

impl std::hash::Hash for Feature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Feature {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Feature {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Process-wide registry of [`Feature`]s plus the asymmetric feature-distance oracle.
///
/// Loaded once from [`crate::data::LinguisticTables`] and shared read-only for the
/// lifetime of a pipeline run.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    by_code: HashMap<String, Feature>,
    /// Asymmetric: `(a.code, b.code) -> distance`; `d(a,b) != d(b,a)` is allowed.
    distances: HashMap<(String, String), f64>,
}

impl FeatureTable {
    pub fn new(
        features_info: &HashMap<String, (u32, String, String)>,
        asymmetric_distance: &HashMap<String, f64>,
    ) -> Self {
        let mut by_code = HashMap::with_capacity(features_info.len());
        for (code, (index, name, category)) in features_info {
            let category = FeatureCategory::from_str(category);
            by_code.insert(code.clone(), Feature::new(name.clone(), code.clone(), category, *index));
        }
        if !by_code.contains_key("X") {
            by_code.insert("X".to_string(), Feature::empty());
        }

        let mut distances = HashMap::with_capacity(asymmetric_distance.len());
        for (key, value) in asymmetric_distance {
            if let Some((a, b)) = key.split_once(',') {
                distances.insert((a.to_string(), b.to_string()), *value);
            }
        }

        FeatureTable { by_code, distances }
    }

    /// Look up a feature by its two-letter code. Panics on an unknown code: codes are
    /// only ever produced from the same tables this registry was built from.
    pub fn get(&self, code: &str) -> &Feature {
        self.by_code.get(code).unwrap_or_else(|| panic!("unknown feature code {code:?}"))
    }

    pub fn try_get(&self, code: &str) -> Option<&Feature> {
        self.by_code.get(code)
    }

    pub fn empty_feature(&self) -> &Feature {
        self.get("X")
    }

    /// Returns the asymmetric distance for the ordered pair `(a.code, b.code)`
    /// if present in the oracle, else `default`.
    pub fn distance_to(&self, a: &Feature, b: &Feature, default: f64) -> f64 {
        self.distances
            .get(&(a.code.clone(), b.code.clone()))
            .copied()
            .unwrap_or(default)
    }
}
