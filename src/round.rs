//! Tournament rounds and the points awarded for winning them.

use std::fmt;

use crate::constants::{ROUND_POINTS, UPSET_BONUS_ROUNDS};
use crate::error::{BracketError, BracketResult};

/// A round of the tournament, numbered 0 (play-in) through 6 (championship).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Round {
    PlayIn,
    RoundOf64,
    RoundOf32,
    Sweet16,
    EliteEight,
    FinalFour,
    Championship,
}

impl Round {
    pub const ALL: [Round; 7] = [
        Round::PlayIn,
        Round::RoundOf64,
        Round::RoundOf32,
        Round::Sweet16,
        Round::EliteEight,
        Round::FinalFour,
        Round::Championship,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// The round the winner of this one plays in next.
    pub fn next(self) -> BracketResult<Round> {
        Round::try_from(self.number() + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::PlayIn => "play-in",
            Round::RoundOf64 => "round of 64",
            Round::RoundOf32 => "round of 32",
            Round::Sweet16 => "sweet sixteen",
            Round::EliteEight => "elite eight",
            Round::FinalFour => "final four",
            Round::Championship => "championship",
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = BracketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Round::ALL
            .get(value as usize)
            .copied()
            .ok_or(BracketError::UnknownRound(value))
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points table for a bracket pool.
///
/// Built once and shared read-only by every game in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundScoring {
    points: [u32; 7],
    upset_rounds: std::ops::RangeInclusive<u8>,
}

impl Default for RoundScoring {
    fn default() -> Self {
        RoundScoring {
            points: ROUND_POINTS,
            upset_rounds: UPSET_BONUS_ROUNDS,
        }
    }
}

impl RoundScoring {
    pub fn new(points: [u32; 7], upset_rounds: std::ops::RangeInclusive<u8>) -> Self {
        RoundScoring {
            points,
            upset_rounds,
        }
    }

    /// Base points for winning a game in `round`
    pub fn points_for_win(&self, round: Round) -> u32 {
        self.points[round as usize]
    }

    pub fn supports_upset_bonus(&self, round: Round) -> bool {
        self.upset_rounds.contains(&round.number())
    }

    /// Seed difference credited when the higher-numbered seed wins.
    pub fn upset_bonus(&self, round: Round, winner_seed: u8, loser_seed: u8) -> u32 {
        if self.supports_upset_bonus(round) && winner_seed > loser_seed {
            u32::from(winner_seed - loser_seed)
        } else {
            0
        }
    }

    /// Total points credited to the winner of a single game
    pub fn points_awarded(&self, round: Round, winner_seed: u8, loser_seed: u8) -> u32 {
        self.points_for_win(round) + self.upset_bonus(round, winner_seed, loser_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_numbers_round_trip() {
        for n in 0..=6u8 {
            assert_eq!(Round::try_from(n).unwrap().number(), n);
        }
    }

    #[test]
    fn test_unknown_round_rejected() {
        assert!(matches!(Round::try_from(7), Err(BracketError::UnknownRound(7))));
        assert!(matches!(
            Round::Championship.next(),
            Err(BracketError::UnknownRound(7))
        ));
    }

    #[test]
    fn test_default_points_table() {
        let scoring = RoundScoring::default();
        let points: Vec<u32> = Round::ALL.iter().map(|&r| scoring.points_for_win(r)).collect();
        assert_eq!(points, vec![0, 1, 2, 4, 8, 16, 32]);
    }

    #[test]
    fn test_upset_bonus_only_in_regional_rounds() {
        let scoring = RoundScoring::default();

        for round in [Round::RoundOf64, Round::RoundOf32, Round::Sweet16, Round::EliteEight] {
            assert_eq!(scoring.upset_bonus(round, 12, 5), 7);
            assert_eq!(scoring.upset_bonus(round, 5, 12), 0);
            assert_eq!(scoring.upset_bonus(round, 4, 4), 0);
        }

        for round in [Round::PlayIn, Round::FinalFour, Round::Championship] {
            assert_eq!(scoring.upset_bonus(round, 16, 1), 0);
        }
    }

    #[test]
    fn test_points_awarded() {
        let scoring = RoundScoring::default();
        assert_eq!(scoring.points_awarded(Round::Sweet16, 11, 2), 4 + 9);
        assert_eq!(scoring.points_awarded(Round::Championship, 11, 1), 32);
        assert_eq!(scoring.points_awarded(Round::PlayIn, 16, 16), 0);
    }
}
