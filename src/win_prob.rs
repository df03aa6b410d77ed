use crate::constants::RATING_SCALE;
use crate::team::Team;

/// Calculate the probability of team1 beating team2.
///
/// Logistic curve on the power rating difference, the same model
/// FiveThirtyEight publishes for its tournament forecasts.
///
/// # Arguments
/// * `team1` - First team
/// * `team2` - Second team
///
/// # Returns
/// Probability of team1 winning, strictly between 0 and 1 for finite ratings
pub fn calculate_win_prob(team1: &Team, team2: &Team) -> f64 {
    calculate_win_prob_from_ratings(team1.power_rating, team2.power_rating)
}

/// Win probability for raw power ratings.
pub fn calculate_win_prob_from_ratings(rating1: f64, rating2: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-(rating1 - rating2) * RATING_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_teams_50_50() {
        let team1 = Team::new("A", 85.0);
        let team2 = Team::new("B", 85.0);

        let prob = calculate_win_prob(&team1, &team2);
        assert!((prob - 0.5).abs() < 1e-12, "Equal teams should have 50% win probability");
    }

    #[test]
    fn test_better_team_favored() {
        let strong = Team::new("Strong", 95.0);
        let weak = Team::new("Weak", 75.0);

        let prob = calculate_win_prob(&strong, &weak);
        assert!(prob > 0.95, "Strong team should be heavily favored, got {}", prob);
        assert!(prob < 1.0, "Probability should be less than 1");
    }

    #[test]
    fn test_known_value() {
        // 400 / 30.464 rating points is one order of magnitude in odds
        let prob = calculate_win_prob_from_ratings(400.0 / 30.464, 0.0);
        assert!((prob - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let team1 = Team::new("Duke", 91.3);
        let team2 = Team::new("UNC", 88.7);

        let prob1 = calculate_win_prob(&team1, &team2);
        let prob2 = calculate_win_prob(&team2, &team1);

        assert!((prob1 + prob2 - 1.0).abs() < 1e-10, "P(A beats B) + P(B beats A) should equal 1");
    }
}
