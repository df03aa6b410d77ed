use rand::Rng;
use std::str::FromStr;
use std::sync::Arc;

use crate::constants::{
    CLOSE_GAME_THRESHOLD, TOP_EXPECTED_KEEP_ALL_MAX, TOP_EXPECTED_KEEP_FRACTION,
    TOP_EXPECTED_MAX_CANDIDATES,
};
use crate::error::BracketError;
use crate::round::{Round, RoundScoring};
use crate::scenario::Scenario;
use crate::win_prob::calculate_win_prob;

/// How the scenarios produced by one game are cut down before moving up the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReductionPolicy {
    /// Keep one outcome per pairing: the favorite when its win probability
    /// exceeds `threshold`, otherwise the upset.
    CloseGame { threshold: f64 },

    /// Keep the best `keep_fraction` of every outcome by expected points,
    /// or all of them when there are at most `keep_all_max`.
    ///
    /// Never more than `max_candidates` survive a game. Without that cap the
    /// candidate count grows exponentially with bracket depth.
    TopExpected {
        keep_fraction: f64,
        keep_all_max: usize,
        max_candidates: usize,
    },
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        ReductionPolicy::close_game()
    }
}

impl ReductionPolicy {
    pub fn close_game() -> Self {
        ReductionPolicy::CloseGame {
            threshold: CLOSE_GAME_THRESHOLD,
        }
    }

    pub fn top_expected() -> Self {
        ReductionPolicy::TopExpected {
            keep_fraction: TOP_EXPECTED_KEEP_FRACTION,
            keep_all_max: TOP_EXPECTED_KEEP_ALL_MAX,
            max_candidates: TOP_EXPECTED_MAX_CANDIDATES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReductionPolicy::CloseGame { .. } => "close-game",
            ReductionPolicy::TopExpected { .. } => "top-expected",
        }
    }
}

impl FromStr for ReductionPolicy {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "close-game" | "close" => Ok(ReductionPolicy::close_game()),
            "top-expected" | "top" => Ok(ReductionPolicy::top_expected()),
            other => Err(BracketError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Build the scenario where `winner` beats `loser` in `round`.
///
/// Points and probabilities from both sides carry over, since the loser's
/// history is part of how this matchup came to be.
pub fn combine_one_outcome(
    winner: &Scenario,
    loser: &Scenario,
    round: Round,
    scoring: &RoundScoring,
) -> Scenario {
    let win_prob = calculate_win_prob(&winner.team, &loser.team);
    let points_for_win = scoring.points_awarded(round, winner.team_seed, loser.team_seed);

    let mut past_wins = Vec::with_capacity(winner.past_wins.len() + loser.past_wins.len() + 1);
    past_wins.extend_from_slice(&winner.past_wins);
    past_wins.extend_from_slice(&loser.past_wins);
    past_wins.push(format!(
        "{} def {} - {} {}",
        winner.team.name, loser.team.name, win_prob, points_for_win
    ));

    Scenario {
        team: Arc::clone(&winner.team),
        team_seed: winner.team_seed,
        points: winner.points + loser.points + points_for_win,
        probability: winner.probability * loser.probability * win_prob,
        game_probability: win_prob,
        past_wins,
    }
}

fn both_outcomes(
    first: &Scenario,
    second: &Scenario,
    round: Round,
    scoring: &RoundScoring,
) -> [Scenario; 2] {
    [
        combine_one_outcome(first, second, round, scoring),
        combine_one_outcome(second, first, round, scoring),
    ]
}

/// Lopsided games go to the favorite; close ones are followed down the upset branch.
fn pick_close_game(
    first: &Scenario,
    second: &Scenario,
    round: Round,
    scoring: &RoundScoring,
    threshold: f64,
) -> Scenario {
    let [first_wins, second_wins] = both_outcomes(first, second, round, scoring);

    // On an exact tie the first side counts as the favorite
    let (favorite, underdog) = if second_wins.game_probability > first_wins.game_probability {
        (second_wins, first_wins)
    } else {
        (first_wins, second_wins)
    };

    if favorite.game_probability > threshold {
        favorite
    } else {
        underdog
    }
}

fn sort_by_expected_points(scenarios: &mut [Scenario]) {
    scenarios.sort_by(|a, b| b.expected_points().total_cmp(&a.expected_points()));
}

/// Play one game between every surviving candidate on each side.
///
/// # Arguments
/// * `first` - Candidates emerging from the first child subtree
/// * `second` - Candidates emerging from the second child subtree
/// * `round` - Round this game is played in
/// * `scoring` - Points table
/// * `policy` - Reduction applied to the resulting outcomes
///
/// # Returns
/// Surviving scenarios for the winner of this game, highest expected points first
pub fn combine_scenario_sets(
    first: &[Scenario],
    second: &[Scenario],
    round: Round,
    scoring: &RoundScoring,
    policy: &ReductionPolicy,
) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = match *policy {
        ReductionPolicy::CloseGame { threshold } => first
            .iter()
            .flat_map(|a| {
                second
                    .iter()
                    .map(move |b| pick_close_game(a, b, round, scoring, threshold))
            })
            .collect(),
        ReductionPolicy::TopExpected { .. } => first
            .iter()
            .flat_map(|a| second.iter().flat_map(move |b| both_outcomes(a, b, round, scoring)))
            .collect(),
    };

    sort_by_expected_points(&mut scenarios);

    if let ReductionPolicy::TopExpected {
        keep_fraction,
        keep_all_max,
        max_candidates,
    } = *policy
    {
        if scenarios.len() > keep_all_max {
            let keep = ((scenarios.len() as f64 * keep_fraction) as usize).max(1);
            scenarios.truncate(keep);
        }
        scenarios.truncate(max_candidates.max(1));
    }

    scenarios
}

/// Monte Carlo game simulation.
///
/// Draws the winner from the win probability model and credits the game
/// exactly as [`combine_one_outcome`] would.
pub fn simulate_game<R: Rng>(
    first: &Scenario,
    second: &Scenario,
    round: Round,
    scoring: &RoundScoring,
    rng: &mut R,
) -> Scenario {
    let prob = calculate_win_prob(&first.team, &second.team);
    if rng.gen::<f64>() < prob {
        combine_one_outcome(first, second, round, scoring)
    } else {
        combine_one_outcome(second, first, round, scoring)
    }
}
