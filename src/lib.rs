//! Bracket Core - scenario engine for single-elimination bracket pools.
//!
//! Folds a tournament bracket bottom-up into the most likely runs of wins
//! for its eventual champion, scoring each run with round points plus an
//! upset bonus. Python bindings are available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod game_transform;
pub mod generator;
pub mod round;
pub mod roster;
pub mod scenario;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use config::{ConfigError, ConfigOverrides, EngineConfig};
pub use constants::{CLOSE_GAME_THRESHOLD, RATING_SCALE, ROUND_POINTS};
pub use error::{BracketError, BracketResult};
pub use game_transform::{combine_one_outcome, combine_scenario_sets, ReductionPolicy};
pub use generator::ScenarioGenerator;
pub use roster::{parse_roster, read_roster};
pub use round::{Round, RoundScoring};
pub use scenario::Scenario;
pub use team::Team;
pub use tournament::{build_bracket, build_region, Region, Tournament};
pub use win_prob::{calculate_win_prob, calculate_win_prob_from_ratings};
