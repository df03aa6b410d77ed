//! Python bindings via PyO3.

use pyo3::prelude::*;
use std::sync::Arc;

use crate::game_transform::ReductionPolicy;
use crate::round::RoundScoring;
use crate::scenario::Scenario;
use crate::team::Team;
use crate::tournament::{Region, Tournament};
use crate::win_prob::calculate_win_prob;

/// Team with a power rating.
#[pyclass(name = "Team")]
#[derive(Clone, Debug)]
pub struct PyTeam {
    #[pyo3(get)]
    pub name: String,

    #[pyo3(get)]
    pub power_rating: f64,
}

#[pymethods]
impl PyTeam {
    #[new]
    pub fn new(name: String, power_rating: f64) -> Self {
        PyTeam { name, power_rating }
    }

    fn __repr__(&self) -> String {
        format!("Team({:?}, {})", self.name, self.power_rating)
    }
}

impl From<&PyTeam> for Team {
    fn from(team: &PyTeam) -> Self {
        Team::new(team.name.clone(), team.power_rating)
    }
}

/// Read-only view of a scenario.
#[pyclass(name = "Scenario")]
#[derive(Clone, Debug)]
pub struct PyScenario {
    #[pyo3(get)]
    pub team: String,

    #[pyo3(get)]
    pub team_seed: u8,

    #[pyo3(get)]
    pub points: u32,

    #[pyo3(get)]
    pub probability: f64,

    #[pyo3(get)]
    pub game_probability: f64,

    #[pyo3(get)]
    pub expected_points: f64,

    #[pyo3(get)]
    pub past_wins: Vec<String>,
}

impl From<Scenario> for PyScenario {
    fn from(scenario: Scenario) -> Self {
        PyScenario {
            team: scenario.team.name.clone(),
            team_seed: scenario.team_seed,
            points: scenario.points,
            probability: scenario.probability,
            game_probability: scenario.game_probability,
            expected_points: scenario.expected_points(),
            past_wins: scenario.past_wins,
        }
    }
}

#[pymethods]
impl PyScenario {
    fn __repr__(&self) -> String {
        format!(
            "Scenario({}, points={}, probability={:.6}, expected_points={:.4})",
            self.team, self.points, self.probability, self.expected_points
        )
    }
}

/// Calculate win probability for a matchup.
#[pyfunction]
#[pyo3(name = "calculate_win_prob")]
fn py_calculate_win_prob(team1: &PyTeam, team2: &PyTeam) -> f64 {
    calculate_win_prob(&team1.into(), &team2.into())
}

/// Evaluate a bracket and return its scenarios.
///
/// `regions` is a list of regions, each a list of 16 seed slots, each a list
/// of one team or two play-in teams.
#[pyfunction]
#[pyo3(name = "evaluate_bracket", signature = (regions, policy = "close-game", threshold = None, keep_fraction = None, max_candidates = None))]
fn py_evaluate_bracket(
    regions: Vec<Vec<Vec<PyTeam>>>,
    policy: &str,
    threshold: Option<f64>,
    keep_fraction: Option<f64>,
    max_candidates: Option<usize>,
) -> PyResult<Vec<PyScenario>> {
    let to_value_error = |e: crate::error::BracketError| pyo3::exceptions::PyValueError::new_err(e.to_string());

    let policy = match policy.parse::<ReductionPolicy>().map_err(to_value_error)? {
        ReductionPolicy::CloseGame { threshold: default } => ReductionPolicy::CloseGame {
            threshold: threshold.unwrap_or(default),
        },
        ReductionPolicy::TopExpected {
            keep_fraction: default_fraction,
            keep_all_max,
            max_candidates: default_max,
        } => ReductionPolicy::TopExpected {
            keep_fraction: keep_fraction.unwrap_or(default_fraction),
            keep_all_max,
            max_candidates: max_candidates.unwrap_or(default_max),
        },
    };

    let regions = regions
        .iter()
        .enumerate()
        .map(|(i, slots)| {
            let slots = slots
                .iter()
                .map(|slot| slot.iter().map(|team| Arc::new(Team::from(team))).collect())
                .collect();
            Region::new(format!("Region {}", i + 1), slots)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_value_error)?;

    let tournament =
        Tournament::new(&regions, RoundScoring::default(), policy).map_err(to_value_error)?;

    Ok(tournament
        .calculate_scenarios()
        .into_iter()
        .map(PyScenario::from)
        .collect())
}

/// Python module definition
#[pymodule]
fn bracket_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyTeam>()?;
    m.add_class::<PyScenario>()?;

    // Core functions
    m.add_function(wrap_pyfunction!(py_calculate_win_prob, m)?)?;
    m.add_function(wrap_pyfunction!(py_evaluate_bracket, m)?)?;

    // Constants
    m.add("ROUND_POINTS", crate::constants::ROUND_POINTS.to_vec())?;
    m.add("CLOSE_GAME_THRESHOLD", crate::constants::CLOSE_GAME_THRESHOLD)?;

    Ok(())
}
