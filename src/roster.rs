//! Roster loading.
//!
//! A roster is a CSV of `region,seed,team,rating` lines. Blank lines and lines
//! starting with `#` are skipped. A seed listed twice in one region becomes a
//! play-in slot.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::constants::REGION_SLOTS;
use crate::error::{BracketError, BracketResult};
use crate::team::Team;
use crate::tournament::Region;

/// Read regions from a roster file.
pub fn read_roster(filepath: impl AsRef<Path>) -> BracketResult<Vec<Region>> {
    let file = File::open(filepath.as_ref())?;
    let regions = parse_lines(BufReader::new(file).lines())?;
    log::debug!(
        "Loaded {} regions from {}",
        regions.len(),
        filepath.as_ref().display()
    );
    Ok(regions)
}

/// Parse regions from roster text.
pub fn parse_roster(text: &str) -> BracketResult<Vec<Region>> {
    parse_lines(text.lines().map(|line| Ok(line.to_string())))
}

fn parse_lines<I>(lines: I) -> BracketResult<Vec<Region>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    // Regions keep the order they first appear in
    let mut order: Vec<String> = Vec::new();
    let mut slots: HashMap<String, Vec<Vec<Arc<Team>>>> = HashMap::new();

    for (i, line) in lines.enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let &[region, seed, name, rating] = parts.as_slice() else {
            return Err(BracketError::RosterParse {
                line: line_no,
                reason: format!("expected 4 fields, found {}", parts.len()),
            });
        };

        let seed = seed
            .parse::<u8>()
            .ok()
            .filter(|s| (1..=REGION_SLOTS as u8).contains(s))
            .ok_or_else(|| BracketError::RosterParse {
                line: line_no,
                reason: format!("invalid seed {:?}", seed),
            })?;

        let rating = rating
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| BracketError::RosterParse {
                line: line_no,
                reason: format!("invalid rating {:?}", rating),
            })?;

        if name.is_empty() {
            return Err(BracketError::RosterParse {
                line: line_no,
                reason: "missing team name".to_string(),
            });
        }

        let region_slots = slots.entry(region.to_string()).or_insert_with(|| {
            order.push(region.to_string());
            vec![Vec::new(); REGION_SLOTS]
        });
        region_slots[usize::from(seed) - 1].push(Arc::new(Team::new(name, rating)));
    }

    order
        .into_iter()
        .map(|name| {
            let region_slots = slots.remove(&name).unwrap_or_default();
            Region::new(name, region_slots)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_region(name: &str) -> String {
        (1..=16)
            .map(|seed| format!("{name},{seed},{name} {seed},{}\n", 100 - seed))
            .collect()
    }

    #[test]
    fn test_parse_region_order_and_play_in() {
        let mut text = String::from("# region,seed,team,rating\n\n");
        text.push_str(&full_region("South"));
        text.push_str(&full_region("East"));
        text.push_str("East,16,East Play-In,70.5\n");

        let regions = parse_roster(&text).unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "South");
        assert_eq!(regions[1].name, "East");
        assert_eq!(regions[1].slot(16).unwrap().len(), 2);
        assert_eq!(regions[1].slot(16).unwrap()[1].name, "East Play-In");
        assert_eq!(regions[0].slot(1).unwrap()[0].power_rating, 99.0);
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        assert!(matches!(
            parse_roster("South,1,Alabama"),
            Err(BracketError::RosterParse { line: 1, .. })
        ));
        assert!(matches!(
            parse_roster("\nSouth,17,Alabama,90"),
            Err(BracketError::RosterParse { line: 2, .. })
        ));
        assert!(matches!(
            parse_roster("South,1,Alabama,strong"),
            Err(BracketError::RosterParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_seed() {
        let text: String = full_region("West")
            .lines()
            .filter(|line| !line.starts_with("West,9,"))
            .map(|line| format!("{line}\n"))
            .collect();

        assert!(matches!(
            parse_roster(&text),
            Err(BracketError::InvalidSeedSlot { seed: 9, teams: 0, .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_roster("/nonexistent/roster.csv"),
            Err(BracketError::Io(_))
        ));
    }
}
