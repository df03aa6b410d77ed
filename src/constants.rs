/// Base points awarded for a win, indexed by round number (0 = play-in, 6 = championship)
pub const ROUND_POINTS: [u32; 7] = [0, 1, 2, 4, 8, 16, 32];

/// Rounds in which an underdog win earns the seed difference as a bonus
pub const UPSET_BONUS_ROUNDS: std::ops::RangeInclusive<u8> = 1..=4;

/// Logistic scale applied to the power rating difference
pub const RATING_SCALE: f64 = 30.464 / 400.0;

/// Favorite win probability above which a game is treated as decided
pub const CLOSE_GAME_THRESHOLD: f64 = 0.67;

/// Share of candidates kept by the top-expected reduction
pub const TOP_EXPECTED_KEEP_FRACTION: f64 = 0.4;

/// Candidate count at or below which the top-expected reduction keeps everything
pub const TOP_EXPECTED_KEEP_ALL_MAX: usize = 4;

/// Most candidates the top-expected reduction passes up from any one game
pub const TOP_EXPECTED_MAX_CANDIDATES: usize = 64;

/// Seed slots per region
pub const REGION_SLOTS: usize = 16;

/// Round-of-64 seed pairings in bracket order.
///
/// Adjacent pairings meet in the round of 32, adjacent winners of those in
/// the sweet sixteen, and so on up to the elite eight.
pub const FIRST_ROUND_PAIRINGS: [(u8, u8); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];
