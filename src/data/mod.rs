//! Embedded static linguistic reference tables: IPA letter/modifier lookups
//! and the phonological feature distance oracle, loaded once via
//! `include_str!` + `serde_json` from `src/data/tables/linguistic_tables.json`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::PhyloError;
use crate::phon::feature::FeatureTable;

const EMBEDDED_TABLES_JSON: &str = include_str!("tables/linguistic_tables.json");

#[derive(Debug, Deserialize)]
struct RawModifier {
    actions: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RawTables {
    ipa_char_replace: HashMap<String, String>,
    ipa_letters: HashMap<String, Vec<String>>,
    ipa_modifiers: HashMap<String, RawModifier>,
    ipa_ignore: Vec<String>,
    features_info: HashMap<String, (u32, String, String)>,
    ipa_rules: RawIpaRules,
    feature_subsets: HashMap<String, Vec<String>>,
    asymmetric_feature_distance: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RawIpaRules {
    advance: HashMap<String, String>,
    lower: HashMap<String, String>,
    upper: HashMap<String, String>,
    dentalize: HashMap<String, String>,
}

/// One parsed IPA diacritic: the ordered list of `(Phoneme mutator, argument
/// feature code)` pairs it triggers. An empty argument code
/// means the mutator takes no argument (`advance`/`lower`/`upper`/`dentalize`).
#[derive(Debug, Clone)]
pub struct ModifierInfo {
    pub actions: Vec<(String, String)>,
}

/// The complete set of static tables the IPA parser and distance model need.
#[derive(Debug)]
pub struct LinguisticTables {
    pub char_replace: HashMap<char, String>,
    pub letters: HashMap<String, Vec<String>>,
    pub modifiers: HashMap<String, ModifierInfo>,
    pub ignore: std::collections::HashSet<char>,
    pub ipa_rules: IpaRules,
    pub vowel_manners: Vec<String>,
    pub features: FeatureTable,
}

#[derive(Debug, Clone)]
pub struct IpaRules {
    pub advance: HashMap<String, String>,
    pub lower: HashMap<String, String>,
    pub upper: HashMap<String, String>,
    pub dentalize: HashMap<String, String>,
}

impl LinguisticTables {
    /// Load the tables shipped with the crate.
    pub fn embedded() -> Result<Self, PhyloError> {
        Self::from_json(EMBEDDED_TABLES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, PhyloError> {
        let raw: RawTables = serde_json::from_str(json).map_err(|e| PhyloError::Tables(e.to_string()))?;

        let char_replace = raw
            .ipa_char_replace
            .into_iter()
            .filter_map(|(k, v)| k.chars().next().map(|c| (c, v)))
            .collect();

        let ignore = raw
            .ipa_ignore
            .into_iter()
            .filter_map(|s| s.chars().next())
            .collect();

        let modifiers = raw
            .ipa_modifiers
            .into_iter()
            .map(|(k, v)| (k, ModifierInfo { actions: v.actions }))
            .collect();

        let features = FeatureTable::new(&raw.features_info, &raw.asymmetric_feature_distance);

        let vowel_manners = raw.feature_subsets.get("vowel_manners").cloned().unwrap_or_default();

        Ok(LinguisticTables {
            char_replace,
            letters: raw.ipa_letters,
            modifiers,
            ignore,
            ipa_rules: IpaRules {
                advance: raw.ipa_rules.advance,
                lower: raw.ipa_rules.lower,
                upper: raw.ipa_rules.upper,
                dentalize: raw.ipa_rules.dentalize,
            },
            vowel_manners,
            features,
        })
    }
}
