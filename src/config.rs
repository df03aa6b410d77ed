//! Engine configuration.
//!
//! Values come from environment variables with typed defaults; the CLI can
//! override any of them before validation.

use crate::constants::{
    CLOSE_GAME_THRESHOLD, TOP_EXPECTED_KEEP_ALL_MAX, TOP_EXPECTED_KEEP_FRACTION,
    TOP_EXPECTED_MAX_CANDIDATES,
};
use crate::game_transform::ReductionPolicy;

/// Default number of scenarios reported
pub const DEFAULT_TOP_N: usize = 10;

/// Settings for one bracket evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Reduction applied at every game
    pub policy: ReductionPolicy,
    /// Number of scenarios to report
    pub top_n: usize,
    /// Monte Carlo simulations to run (0 disables)
    pub simulations: usize,
    /// Seed for the simulations
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            policy: ReductionPolicy::default(),
            top_n: DEFAULT_TOP_N,
            simulations: 0,
            seed: None,
        }
    }
}

/// Values supplied on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub policy: Option<String>,
    pub top_n: Option<usize>,
    pub simulations: Option<usize>,
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if `--policy` or `BRACKET_POLICY` names an unknown policy
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let (policy_source, policy_name) = match overrides.policy {
            Some(name) => ("--policy", name),
            None => (
                "BRACKET_POLICY",
                std::env::var("BRACKET_POLICY").unwrap_or_else(|_| "close-game".to_string()),
            ),
        };

        let policy = match policy_name.parse::<ReductionPolicy>() {
            Ok(ReductionPolicy::CloseGame { .. }) => ReductionPolicy::CloseGame {
                threshold: parse_env_or("BRACKET_UPSET_THRESHOLD", CLOSE_GAME_THRESHOLD),
            },
            Ok(ReductionPolicy::TopExpected { .. }) => ReductionPolicy::TopExpected {
                keep_fraction: parse_env_or("BRACKET_KEEP_FRACTION", TOP_EXPECTED_KEEP_FRACTION),
                keep_all_max: TOP_EXPECTED_KEEP_ALL_MAX,
                max_candidates: parse_env_or("BRACKET_MAX_CANDIDATES", TOP_EXPECTED_MAX_CANDIDATES),
            },
            Err(e) => {
                return Err(ConfigError::Invalid {
                    var: policy_source.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let config = EngineConfig {
            policy,
            top_n: overrides
                .top_n
                .unwrap_or_else(|| parse_env_or("BRACKET_TOP_N", DEFAULT_TOP_N)),
            simulations: overrides
                .simulations
                .unwrap_or_else(|| parse_env_or("BRACKET_SIMULATIONS", 0)),
            seed: overrides.seed.or_else(|| {
                std::env::var("BRACKET_SEED")
                    .ok()
                    .and_then(|v| v.parse().ok())
            }),
        };

        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.policy {
            ReductionPolicy::CloseGame { threshold } => {
                if !(threshold > 0.5 && threshold < 1.0) {
                    return Err(ConfigError::Invalid {
                        var: "BRACKET_UPSET_THRESHOLD".to_string(),
                        reason: format!("Must be between 0.5 and 1, got {}", threshold),
                    });
                }
            }
            ReductionPolicy::TopExpected {
                keep_fraction,
                max_candidates,
                ..
            } => {
                if !(keep_fraction > 0.0 && keep_fraction <= 1.0) {
                    return Err(ConfigError::Invalid {
                        var: "BRACKET_KEEP_FRACTION".to_string(),
                        reason: format!("Must be in (0, 1], got {}", keep_fraction),
                    });
                }
                if max_candidates == 0 {
                    return Err(ConfigError::Invalid {
                        var: "BRACKET_MAX_CANDIDATES".to_string(),
                        reason: "Must be greater than 0".to_string(),
                    });
                }
            }
        }

        if self.top_n == 0 {
            return Err(ConfigError::Invalid {
                var: "BRACKET_TOP_N".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
