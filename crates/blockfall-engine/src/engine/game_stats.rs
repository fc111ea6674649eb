use serde::{Deserialize, Serialize};

/// Largest number of rows a single tetromino can complete at once.
const MAX_LINES_PER_LOCK: usize = 4;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: `points_per_line` for every cleared row
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks that cleared 0, 1, 2, 3 or 4 rows
///
/// # Scoring
///
/// Scoring is linear in the number of cleared rows:
/// - No multi-line bonuses
/// - No drop-distance bonuses
/// - No combo bonuses
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// let delta = stats.complete_piece_drop(4, 100);
///
/// assert_eq!(delta, 400);
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_LINES_PER_LOCK + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_LINES_PER_LOCK + 1],
        }
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of lines cleared across all line clears.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of locks with 0 lines cleared
    /// - `[1]`: Number of singles (1 line)
    /// - `[2]`: Number of doubles (2 lines)
    /// - `[3]`: Number of triples (3 lines)
    /// - `[4]`: Number of quadruples (4 lines)
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_LINES_PER_LOCK + 1] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock and returns the score gained.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by this lock (0-4)
    /// * `points_per_line` - Score awarded per cleared line
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, points_per_line: usize) -> usize {
        let delta = cleared_lines.saturating_mul(points_per_line);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score = self.score.saturating_add(delta);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
        assert_eq!(stats, GameStats::default());
    }

    #[test]
    fn test_score_is_linear_in_lines() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(0, 100), 0);
        assert_eq!(stats.complete_piece_drop(1, 100), 100);
        assert_eq!(stats.complete_piece_drop(3, 100), 300);
        assert_eq!(stats.score(), 400);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_lines(), 4);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_custom_points_per_line() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(2, 40), 80);
        assert_eq!(stats.score(), 80);
    }
}
