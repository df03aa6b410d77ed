//! Bracket construction error types.

use thiserror::Error;

/// Caller contract violations raised while assembling a bracket.
///
/// None of these are recoverable inside the engine; they propagate to whatever
/// assembled the roster.
#[derive(Debug, Error)]
pub enum BracketError {
    /// A seed slot holds neither one team nor a two-team play-in
    #[error("Region {region} seed {seed} has {teams} teams, expected 1 or 2")]
    InvalidSeedSlot { region: String, seed: u8, teams: usize },

    /// A region does not have one slot per seed
    #[error("Region {region} has {slots} seed slots, expected 16")]
    RegionSize { region: String, slots: usize },

    /// Regions cannot be paired off into a single bracket
    #[error("Cannot build a bracket from {0} regions")]
    RegionCount(usize),

    /// No scoring is defined for this round
    #[error("Unknown round {0}, expected 0-6")]
    UnknownRound(u8),

    /// Unrecognised reduction policy name
    #[error("Unknown reduction policy {0:?}, expected close-game or top-expected")]
    UnknownPolicy(String),

    /// Malformed roster line
    #[error("Roster line {line}: {reason}")]
    RosterParse { line: usize, reason: String },

    /// Roster file could not be read
    #[error("Failed to read roster: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
