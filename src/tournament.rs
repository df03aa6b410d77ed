use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{FIRST_ROUND_PAIRINGS, REGION_SLOTS};
use crate::error::{BracketError, BracketResult};
use crate::game_transform::ReductionPolicy;
use crate::generator::ScenarioGenerator;
use crate::round::{Round, RoundScoring};
use crate::scenario::Scenario;
use crate::team::Team;

/// Seeding table for one region: slot `i` holds the team(s) seeded `i + 1`.
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    slots: Vec<Vec<Arc<Team>>>,
}

impl Region {
    /// Validate and wrap a region's seed slots.
    ///
    /// Each of the 16 slots holds one team, or two teams who meet in a play-in.
    pub fn new(name: impl Into<String>, slots: Vec<Vec<Arc<Team>>>) -> BracketResult<Self> {
        let name = name.into();

        if slots.len() != REGION_SLOTS {
            return Err(BracketError::RegionSize {
                region: name,
                slots: slots.len(),
            });
        }

        for (i, slot) in slots.iter().enumerate() {
            if !(1..=2).contains(&slot.len()) {
                return Err(BracketError::InvalidSeedSlot {
                    region: name,
                    seed: (i + 1) as u8,
                    teams: slot.len(),
                });
            }
        }

        Ok(Region { name, slots })
    }

    /// Teams seeded `seed`, or `None` outside 1-16
    pub fn slot(&self, seed: u8) -> Option<&[Arc<Team>]> {
        let index = usize::from(seed).checked_sub(1)?;
        self.slots.get(index).map(Vec::as_slice)
    }

    pub fn slots(&self) -> &[Vec<Arc<Team>>] {
        &self.slots
    }
}

/// Generator for one seed slot: the team itself, or its play-in game.
pub fn seed_slot_generator(region: &Region, seed: u8) -> BracketResult<ScenarioGenerator> {
    match region.slot(seed).unwrap_or_default() {
        [team] => Ok(ScenarioGenerator::leaf(Arc::clone(team), seed)),
        [first, second] => Ok(ScenarioGenerator::play_in(
            Arc::clone(first),
            Arc::clone(second),
            seed,
        )),
        slot => Err(BracketError::InvalidSeedSlot {
            region: region.name.clone(),
            seed,
            teams: slot.len(),
        }),
    }
}

/// Pair adjacent subtrees into games of `round` until one remains.
fn fold_pairwise(
    mut games: Vec<ScenarioGenerator>,
    mut round: Round,
) -> BracketResult<ScenarioGenerator> {
    while games.len() > 1 {
        let mut next_games = Vec::with_capacity(games.len() / 2);
        let mut pending = games.into_iter();
        while let (Some(first), Some(second)) = (pending.next(), pending.next()) {
            next_games.push(ScenarioGenerator::game(round, first, second));
        }

        games = next_games;
        if games.len() > 1 {
            round = round.next()?;
        }
    }

    games.pop().ok_or(BracketError::RegionCount(0))
}

/// Build a region's tree: round of 64 through the elite eight.
pub fn build_region(region: &Region) -> BracketResult<ScenarioGenerator> {
    let first_round = FIRST_ROUND_PAIRINGS
        .iter()
        .map(|&(high, low)| {
            Ok(ScenarioGenerator::game(
                Round::RoundOf64,
                seed_slot_generator(region, high)?,
                seed_slot_generator(region, low)?,
            ))
        })
        .collect::<BracketResult<Vec<_>>>()?;

    let team_count: usize = region.slots.iter().map(Vec::len).sum();
    log::debug!("Built region {} ({} teams)", region.name, team_count);

    fold_pairwise(first_round, Round::RoundOf32)
}

/// Join region trees into a full bracket, starting at the final four.
///
/// A single region is returned as is. Otherwise the count must be a power of
/// two small enough that the last game is still a scored round.
pub fn build_bracket(regions: &[Region]) -> BracketResult<ScenarioGenerator> {
    if regions.is_empty() || !regions.len().is_power_of_two() {
        return Err(BracketError::RegionCount(regions.len()));
    }

    let region_trees = regions
        .iter()
        .map(build_region)
        .collect::<BracketResult<Vec<_>>>()?;

    let bracket = fold_pairwise(region_trees, Round::FinalFour)?;
    log::debug!("Built bracket from {} regions, depth {}", regions.len(), bracket.depth());
    Ok(bracket)
}

/// Tournament bracket with scoring rules and reduction policy.
#[derive(Clone, Debug)]
pub struct Tournament {
    root: ScenarioGenerator,

    /// Points awarded per round
    pub scoring: RoundScoring,

    /// Reduction applied at every game
    pub policy: ReductionPolicy,
}

impl Tournament {
    pub fn new(
        regions: &[Region],
        scoring: RoundScoring,
        policy: ReductionPolicy,
    ) -> BracketResult<Self> {
        Ok(Tournament {
            root: build_bracket(regions)?,
            scoring,
            policy,
        })
    }

    /// Wrap an already built tree.
    pub fn from_root(root: ScenarioGenerator, scoring: RoundScoring, policy: ReductionPolicy) -> Self {
        Tournament {
            root,
            scoring,
            policy,
        }
    }

    pub fn root(&self) -> &ScenarioGenerator {
        &self.root
    }

    /// Scenarios for the bracket winner, highest expected points first.
    pub fn calculate_scenarios(&self) -> Vec<Scenario> {
        log::info!("Evaluating bracket with {} policy", self.policy.name());
        let scenarios = self.root.get_scenarios(&self.scoring, &self.policy);
        log::info!("Bracket evaluation produced {} scenarios", scenarios.len());
        scenarios
    }

    pub fn top_scenarios(&self, n: usize) -> Vec<Scenario> {
        let mut scenarios = self.calculate_scenarios();
        scenarios.truncate(n);
        scenarios
    }

    /// Simulate the bracket once.
    ///
    /// Returns the realized path of the champion.
    pub fn simulate(&self, seed: Option<u64>) -> Scenario {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.root.simulate(&self.scoring, &mut rng)
    }

    /// Run multiple Monte Carlo simulations.
    ///
    /// Per-simulation seeds come from one master RNG, so a fixed `seed`
    /// reproduces the whole batch even though simulations run in parallel.
    pub fn run_simulations(&self, n_simulations: usize, seed: Option<u64>) -> Vec<Scenario> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let seeds: Vec<u64> = (0..n_simulations).map(|_| rng.gen::<u64>()).collect();

        log::info!("Running {} bracket simulations", n_simulations);
        seeds
            .into_par_iter()
            .map(|sim_seed| self.simulate(Some(sim_seed)))
            .collect()
    }

    /// Share of simulations won by each champion.
    pub fn champion_frequencies(&self, n_simulations: usize, seed: Option<u64>) -> HashMap<String, f64> {
        let mut counts: HashMap<String, f64> = HashMap::new();
        if n_simulations == 0 {
            return counts;
        }

        for scenario in self.run_simulations(n_simulations, seed) {
            *counts.entry(scenario.team.name.clone()).or_insert(0.0) += 1.0;
        }
        for share in counts.values_mut() {
            *share /= n_simulations as f64;
        }
        counts
    }

    /// Get all teams in the bracket.
    pub fn teams(&self) -> Vec<Arc<Team>> {
        self.root.teams()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_region(name: &str) -> Region {
        // Ratings fall off with seed so favorites are clear in early rounds
        let slots = (1..=16)
            .map(|seed| {
                let rating = 100.0 - 2.0 * seed as f64;
                vec![Arc::new(Team::new(format!("{name}{seed}"), rating))]
            })
            .collect();
        Region::new(name, slots).unwrap()
    }

    #[test]
    fn test_region_rejects_empty_slot() {
        let mut slots: Vec<Vec<Arc<Team>>> = (1..=16)
            .map(|seed| vec![Arc::new(Team::new(format!("T{seed}"), 80.0))])
            .collect();
        slots[10].clear();

        let err = Region::new("East", slots).unwrap_err();
        assert!(matches!(err, BracketError::InvalidSeedSlot { seed: 11, teams: 0, .. }));
    }

    #[test]
    fn test_region_rejects_three_team_slot() {
        let mut slots: Vec<Vec<Arc<Team>>> = (1..=16)
            .map(|seed| vec![Arc::new(Team::new(format!("T{seed}"), 80.0))])
            .collect();
        slots[15].push(Arc::new(Team::new("X", 70.0)));
        slots[15].push(Arc::new(Team::new("Y", 70.0)));

        let err = Region::new("East", slots).unwrap_err();
        assert!(matches!(err, BracketError::InvalidSeedSlot { seed: 16, teams: 3, .. }));
    }

    #[test]
    fn test_region_rejects_wrong_slot_count() {
        let slots = vec![vec![Arc::new(Team::new("A", 80.0))]; 15];
        assert!(matches!(
            Region::new("West", slots),
            Err(BracketError::RegionSize { slots: 15, .. })
        ));
    }

    #[test]
    fn test_seed_slot_out_of_range() {
        let region = make_region("South");

        for seed in [0, 17] {
            assert!(region.slot(seed).is_none());
            assert!(matches!(
                seed_slot_generator(&region, seed),
                Err(BracketError::InvalidSeedSlot { teams: 0, .. })
            ));
        }
        assert!(seed_slot_generator(&region, 16).is_ok());
    }

    #[test]
    fn test_region_tree_shape() {
        let tree = build_region(&make_region("S")).unwrap();

        assert_eq!(tree.depth(), 4);
        let names: Vec<String> = tree.teams().iter().map(|t| t.name.clone()).collect();
        let expected: Vec<String> = [1, 16, 8, 9, 5, 12, 4, 13, 6, 11, 3, 14, 7, 10, 2, 15]
            .iter()
            .map(|seed| format!("S{seed}"))
            .collect();
        assert_eq!(names, expected);

        match &tree {
            ScenarioGenerator::Game { round, .. } => assert_eq!(*round, Round::EliteEight),
            ScenarioGenerator::Leaf { .. } => panic!("region root should be a game"),
        }
    }

    #[test]
    fn test_bracket_rounds() {
        let regions: Vec<Region> = ["S", "E", "M", "W"].iter().map(|n| make_region(n)).collect();
        let bracket = build_bracket(&regions).unwrap();

        assert_eq!(bracket.depth(), 6);
        match &bracket {
            ScenarioGenerator::Game { round, first, .. } => {
                assert_eq!(*round, Round::Championship);
                assert!(matches!(**first, ScenarioGenerator::Game { round: Round::FinalFour, .. }));
            }
            ScenarioGenerator::Leaf { .. } => panic!("bracket root should be a game"),
        }
    }

    #[test]
    fn test_bracket_region_count() {
        let regions: Vec<Region> = (0..3).map(|i| make_region(&format!("R{i}"))).collect();
        assert!(matches!(build_bracket(&regions), Err(BracketError::RegionCount(3))));
        assert!(matches!(build_bracket(&[]), Err(BracketError::RegionCount(0))));

        let regions: Vec<Region> = (0..8).map(|i| make_region(&format!("R{i}"))).collect();
        assert!(matches!(build_bracket(&regions), Err(BracketError::UnknownRound(7))));
    }

    #[test]
    fn test_calculate_scenarios_single_region() {
        let tournament = Tournament::new(
            &[make_region("S")],
            RoundScoring::default(),
            ReductionPolicy::default(),
        )
        .unwrap();

        let scenarios = tournament.calculate_scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].games(), 15);
        assert!(scenarios[0].probability > 0.0 && scenarios[0].probability <= 1.0);
    }

    #[test]
    fn test_simulations_deterministic() {
        let regions: Vec<Region> = ["S", "E"].iter().map(|n| make_region(n)).collect();
        let tournament =
            Tournament::new(&regions, RoundScoring::default(), ReductionPolicy::default()).unwrap();

        let sims1 = tournament.run_simulations(20, Some(42));
        let sims2 = tournament.run_simulations(20, Some(42));

        assert_eq!(sims1, sims2);
        assert!(sims1.iter().all(|s| s.games() == 31));
    }

    #[test]
    fn test_champion_frequencies_sum_to_one() {
        let tournament = Tournament::new(
            &[make_region("S")],
            RoundScoring::default(),
            ReductionPolicy::default(),
        )
        .unwrap();

        let shares = tournament.champion_frequencies(200, Some(1));
        let total: f64 = shares.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(tournament.teams().len(), 16);
    }
}
