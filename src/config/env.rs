//! Environment variable configuration for the phylo pipeline.

use std::env;

/// Environment variable names.
pub mod vars {
    /// Log level (trace, debug, info, warn, error)
    pub const LOG_LEVEL: &str = "PHYLO_LOG_LEVEL";

    /// Default per-feature-pair fallback cost for the phoneme distance oracle
    pub const MAX_PAIR_COST: &str = "PHYLO_MAX_PAIR_COST";

    /// Default synonymy-vs-merge threshold for reconstruction
    pub const THRESHOLD: &str = "PHYLO_THRESHOLD";

    /// Default minimum lexeme count for a catalogue language to be kept
    pub const MIN_WORDS: &str = "PHYLO_MIN_WORDS";

    /// Enable debug mode (thread ids, file/line in log output)
    pub const DEBUG_MODE: &str = "PHYLO_DEBUG";
}

/// Runtime configuration sourced from the environment.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub max_pair_cost: f64,
    pub threshold: f64,
    pub min_words: u32,
    pub debug_mode: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            log_level: "info".to_string(),
            max_pair_cost: 10.0,
            threshold: 2.0,
            min_words: 40,
            debug_mode: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = env::var(vars::LOG_LEVEL) {
            config.log_level = level.to_lowercase();
        }
        if let Ok(cost) = env::var(vars::MAX_PAIR_COST) {
            if let Ok(value) = cost.parse() {
                config.max_pair_cost = value;
            }
        }
        if let Ok(threshold) = env::var(vars::THRESHOLD) {
            if let Ok(value) = threshold.parse() {
                config.threshold = value;
            }
        }
        if let Ok(min_words) = env::var(vars::MIN_WORDS) {
            if let Ok(value) = min_words.parse() {
                config.min_words = value;
            }
        }
        config.debug_mode = env::var(vars::DEBUG_MODE).map(|v| v == "1" || v.to_lowercase() == "true").unwrap_or(false);

        config
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(format!("invalid log level: {}", self.log_level)),
        }
        if self.max_pair_cost <= 0.0 {
            return Err("max pair cost must be greater than 0".to_string());
        }
        if self.threshold <= 0.0 {
            return Err("threshold must be greater than 0".to_string());
        }
        Ok(())
    }
}
