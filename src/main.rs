//! bracket CLI - prints the most likely high-scoring bracket scenarios.

use anyhow::{Context, Error};
use log::info;
use pico_args::Arguments;

use bracket_core::{read_roster, ConfigOverrides, EngineConfig, RoundScoring, Scenario, Tournament};

const HELP: &str = "\
Find the most likely scoring scenarios for a tournament bracket

USAGE:
  bracket [OPTIONS]

OPTIONS:
  --roster       PATH    Roster CSV (region,seed,team,rating)  [default: data/sample_roster.csv]
  --policy       NAME    close-game or top-expected            [default: env BRACKET_POLICY or close-game]
  --top          N       Scenarios to print                    [default: env BRACKET_TOP_N or 10]
  --simulations  N       Monte Carlo runs for champion odds    [default: env BRACKET_SIMULATIONS or 0]
  --seed         N       Simulation seed                       [default: env BRACKET_SEED]

FLAGS:
  --json                 Print scenarios as JSON
  -h, --help             Print help information

ENVIRONMENT:
  BRACKET_UPSET_THRESHOLD  Favorite probability above which a game is decided [default: 0.67]
  BRACKET_KEEP_FRACTION    Share kept by the top-expected policy             [default: 0.4]
  BRACKET_MAX_CANDIDATES   Most scenarios top-expected keeps per game        [default: 64]
  RUST_LOG                 Log level (e.g. debug)
";

const DEFAULT_ROSTER: &str = "data/sample_roster.csv";

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let json = pargs.contains("--json");
    let roster: String = pargs
        .opt_value_from_str("--roster")?
        .unwrap_or_else(|| DEFAULT_ROSTER.to_string());
    let overrides = ConfigOverrides {
        policy: pargs.opt_value_from_str("--policy")?,
        top_n: pargs.opt_value_from_str("--top")?,
        simulations: pargs.opt_value_from_str("--simulations")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    let config = EngineConfig::from_env(overrides)?;
    config.validate()?;

    let regions = read_roster(&roster).with_context(|| format!("Loading roster {roster}"))?;
    info!("Loaded {} regions from {}", regions.len(), roster);

    let tournament = Tournament::new(&regions, RoundScoring::default(), config.policy)?;
    let scenarios = tournament.top_scenarios(config.top_n);

    if json {
        let rows = scenarios
            .iter()
            .map(scenario_json)
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for scenario in &scenarios {
            println!(
                "{} {} {}: {} - [{}]",
                scenario.expected_points(),
                scenario.probability,
                scenario.points,
                scenario.team.name,
                scenario.past_wins.join(", ")
            );
        }
    }

    if config.simulations > 0 {
        let mut shares: Vec<(String, f64)> = tournament
            .champion_frequencies(config.simulations, config.seed)
            .into_iter()
            .collect();
        shares.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        println!();
        println!("Champion odds over {} simulations:", config.simulations);
        for (team, share) in shares.iter().take(config.top_n) {
            println!("  {:<24} {:>6.2}%", team, share * 100.0);
        }
    }

    Ok(())
}

/// Serialized scenario plus its derived expected points
fn scenario_json(scenario: &Scenario) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(scenario)?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert(
            "expected_points".to_string(),
            serde_json::Value::from(scenario.expected_points()),
        );
    }
    Ok(value)
}
