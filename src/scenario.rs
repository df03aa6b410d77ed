use std::sync::Arc;

use serde::Serialize;

use crate::team::Team;

/// One hypothesized run of wins for a team through part of the bracket.
///
/// The scenario covers every game in the subtree it came from: the loser's
/// picks, points and probability are folded in each time two scenarios meet.
///
/// Scenarios are never mutated once built; each game produces a new value
/// from the two scenarios that met in it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scenario {
    pub team: Arc<Team>,

    /// Seed of the bracket slot the team started in
    pub team_seed: u8,

    /// Points credited for every win in this scenario
    pub points: u32,

    /// Joint probability that every win in `past_wins` happens
    pub probability: f64,

    /// Win probability of the most recent game only
    pub game_probability: f64,

    /// Game descriptions, each subtree's history before the game that joined them
    pub past_wins: Vec<String>,
}

impl Scenario {
    /// Starting scenario for a team that has not played yet.
    pub fn initial(team: Arc<Team>, team_seed: u8) -> Self {
        Scenario {
            team,
            team_seed,
            points: 0,
            probability: 1.0,
            game_probability: 1.0,
            past_wins: Vec::new(),
        }
    }

    pub fn expected_points(&self) -> f64 {
        f64::from(self.points) * self.probability
    }

    /// Number of games decided along the way, the loser's subtree included
    pub fn games(&self) -> usize {
        self.past_wins.len()
    }
}
