//! Pipeline configuration, built from environment defaults and overridable by CLI flags.

pub mod env;

use self::env::EnvConfig;
use crate::distance::phoneme::PhonemeDistanceConfig;

/// Resolved configuration for a single `phylo build` run.
#[derive(Debug, Clone)]
pub struct PhyloConfig {
    pub min_words: u32,
    pub phoneme_distance: PhonemeDistanceConfig,
    pub threshold: f64,
}

impl Default for PhyloConfig {
    fn default() -> Self {
        PhyloConfig::from_env()
    }
}

impl PhyloConfig {
    pub fn from_env() -> Self {
        let env_config = EnvConfig::from_env();
        PhyloConfig {
            min_words: env_config.min_words,
            phoneme_distance: PhonemeDistanceConfig { max_pair_cost: env_config.max_pair_cost },
            threshold: env_config.threshold,
        }
    }
}
