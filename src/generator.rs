//! Bracket tree of scenario generators.
//!
//! Every node is a pure function of its children: a leaf yields the starting
//! scenario for one team, and a game node plays the scenarios coming out of
//! its two subtrees against each other.

use rand::Rng;
use std::sync::Arc;

use crate::game_transform::{combine_scenario_sets, simulate_game, ReductionPolicy};
use crate::round::{Round, RoundScoring};
use crate::scenario::Scenario;
use crate::team::Team;

#[derive(Clone, Debug)]
pub enum ScenarioGenerator {
    /// A single team entering the bracket at `seed`
    Leaf { team: Arc<Team>, seed: u8 },

    /// The game played in `round` between the winners of two subtrees
    Game {
        round: Round,
        first: Box<ScenarioGenerator>,
        second: Box<ScenarioGenerator>,
    },
}

impl ScenarioGenerator {
    pub fn leaf(team: Arc<Team>, seed: u8) -> Self {
        ScenarioGenerator::Leaf { team, seed }
    }

    pub fn game(round: Round, first: ScenarioGenerator, second: ScenarioGenerator) -> Self {
        ScenarioGenerator::Game {
            round,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Round-0 game between two teams sharing a seed slot.
    pub fn play_in(first: Arc<Team>, second: Arc<Team>, seed: u8) -> Self {
        ScenarioGenerator::game(
            Round::PlayIn,
            ScenarioGenerator::leaf(first, seed),
            ScenarioGenerator::leaf(second, seed),
        )
    }

    /// Scenarios for whoever wins the subtree rooted here.
    ///
    /// Both children are evaluated before this node combines them; sibling
    /// subtrees run in parallel on the rayon pool.
    pub fn get_scenarios(&self, scoring: &RoundScoring, policy: &ReductionPolicy) -> Vec<Scenario> {
        match self {
            ScenarioGenerator::Leaf { team, seed } => {
                vec![Scenario::initial(Arc::clone(team), *seed)]
            }
            ScenarioGenerator::Game {
                round,
                first,
                second,
            } => {
                let (first_scenarios, second_scenarios) = rayon::join(
                    || first.get_scenarios(scoring, policy),
                    || second.get_scenarios(scoring, policy),
                );
                let scenarios =
                    combine_scenario_sets(&first_scenarios, &second_scenarios, *round, scoring, policy);
                log::trace!(
                    "{}: {} x {} candidates -> {}",
                    round,
                    first_scenarios.len(),
                    second_scenarios.len(),
                    scenarios.len()
                );
                scenarios
            }
        }
    }

    /// Play the subtree once, drawing every game winner at random.
    pub fn simulate<R: Rng>(&self, scoring: &RoundScoring, rng: &mut R) -> Scenario {
        match self {
            ScenarioGenerator::Leaf { team, seed } => Scenario::initial(Arc::clone(team), *seed),
            ScenarioGenerator::Game {
                round,
                first,
                second,
            } => {
                let first_winner = first.simulate(scoring, rng);
                let second_winner = second.simulate(scoring, rng);
                simulate_game(&first_winner, &second_winner, *round, scoring, rng)
            }
        }
    }

    /// Leaf teams in bracket order
    pub fn teams(&self) -> Vec<Arc<Team>> {
        let mut teams = Vec::new();
        self.collect_teams(&mut teams);
        teams
    }

    fn collect_teams(&self, teams: &mut Vec<Arc<Team>>) {
        match self {
            ScenarioGenerator::Leaf { team, .. } => teams.push(Arc::clone(team)),
            ScenarioGenerator::Game { first, second, .. } => {
                first.collect_teams(teams);
                second.collect_teams(teams);
            }
        }
    }

    /// Longest chain of games from a leaf up to this node.
    pub fn depth(&self) -> usize {
        match self {
            ScenarioGenerator::Leaf { .. } => 0,
            ScenarioGenerator::Game { first, second, .. } => 1 + first.depth().max(second.depth()),
        }
    }
}
