use std::time::Duration;

use serde::Serialize;

/// Points awarded for each cleared line.
pub const POINTS_PER_LINE: usize = 100;

/// Every time the score reaches a positive multiple of this, the level goes up.
pub const LEVEL_UP_SCORE: usize = 500;

/// Interval the level formula counts down from.
pub const BASE_TICK_INTERVAL_MS: u64 = 500;

/// Shortest gravity tick interval, reached at high levels.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// How much each level shortens the tick interval.
pub const TICK_INTERVAL_STEP_MS: u64 = 50;

/// Tick interval set when the game reaches `level`.
///
/// `max(100, 500 - level * 50)`; non-increasing in `level`. The configured
/// initial interval only applies before the first level-up.
#[must_use]
pub fn tick_interval_ms(level: usize) -> u64 {
    let step = u64::try_from(level)
        .unwrap_or(u64::MAX)
        .saturating_mul(TICK_INTERVAL_STEP_MS);
    BASE_TICK_INTERVAL_MS
        .saturating_sub(step)
        .max(MIN_TICK_INTERVAL_MS)
}

/// Game statistics tracking score, level and line clears.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: 100 points per cleared line
/// - **Level**: Starts at 1, +1 each time the score hits a multiple of 500
/// - **Tick interval**: Initial interval until the first level-up, then
///   [`tick_interval_ms`] of the new level whatever the initial interval was
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks by number of lines cleared
///
/// Points are added one line at a time, so a multi-line clear that jumps over a
/// multiple of 500 still levels up once for each multiple passed.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new(500);
/// stats.complete_piece_drop(4);
/// assert_eq!((stats.score(), stats.level()), (400, 1));
///
/// let gained = stats.complete_piece_drop(2);
/// assert_eq!(gained, 1);
/// assert_eq!((stats.score(), stats.level()), (600, 2));
/// assert_eq!(stats.tick_interval_ms(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    tick_interval_ms: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new(initial_interval_ms: u64) -> Self {
        Self {
            score: 0,
            level: 1,
            tick_interval_ms: initial_interval_ms,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Current gravity tick interval in milliseconds.
    #[must_use]
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by the number of lines they cleared.
    ///
    /// Index `n` counts locks that cleared `n` lines (0 to 4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock and returns the levels gained.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }

        let mut gained = 0;
        for _ in 0..cleared_lines {
            self.score += POINTS_PER_LINE;
            if self.score.is_multiple_of(LEVEL_UP_SCORE) {
                self.level += 1;
                self.tick_interval_ms = tick_interval_ms(self.level);
                gained += 1;
            }
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new(500);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.tick_interval_ms(), 500);
        assert_eq!(stats.tick_interval(), Duration::from_millis(500));
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_score_is_100_per_line() {
        for lines in 0..=4 {
            let mut stats = GameStats::new(500);
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), 100 * lines);
            assert_eq!(stats.line_cleared_counter()[lines], 1);
        }
    }

    #[test]
    fn test_no_lines_no_score() {
        let mut stats = GameStats::new(500);
        assert_eq!(stats.complete_piece_drop(0), 0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn test_level_up_at_exact_multiple() {
        let mut stats = GameStats::new(500);
        stats.complete_piece_drop(4);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.complete_piece_drop(1), 1);
        assert_eq!(stats.score(), 500);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.tick_interval_ms(), 400);
    }

    #[test]
    fn test_level_up_when_crossing_multiple() {
        let mut stats = GameStats::new(500);
        stats.complete_piece_drop(3);
        assert_eq!(stats.complete_piece_drop(3), 1);
        assert_eq!(stats.score(), 600);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_one_level_per_threshold() {
        let mut stats = GameStats::new(500);
        let mut gained = 0;
        for _ in 0..10 {
            gained += stats.complete_piece_drop(4);
        }
        assert_eq!(stats.score(), 4000);
        assert_eq!(gained, 8);
        assert_eq!(stats.level(), 9);
        assert_eq!(stats.total_cleared_lines(), 40);
    }

    #[test]
    fn test_level_up_ignores_initial_interval() {
        let mut stats = GameStats::new(300);
        assert_eq!(stats.tick_interval_ms(), 300);
        stats.complete_piece_drop(4);
        assert_eq!(stats.tick_interval_ms(), 300);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.tick_interval_ms(), 400);

        let mut stats = GameStats::new(1000);
        stats.complete_piece_drop(4);
        stats.complete_piece_drop(4);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.tick_interval_ms(), 400);
    }

    #[test]
    fn test_interval_floor() {
        assert_eq!(tick_interval_ms(1), 450);
        assert_eq!(tick_interval_ms(7), 150);
        assert_eq!(tick_interval_ms(8), 100);
        assert_eq!(tick_interval_ms(9), 100);
        assert_eq!(tick_interval_ms(usize::MAX), 100);
    }

    #[test]
    fn test_interval_is_non_increasing() {
        let mut prev = tick_interval_ms(0);
        for level in 1..30 {
            let next = tick_interval_ms(level);
            assert!(next <= prev, "level {level}: {next} > {prev}");
            assert!(next >= MIN_TICK_INTERVAL_MS);
            prev = next;
        }
    }
}
