use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::board::Board};

use super::piece_generator::Randomizer;

/// Settings fixed for the lifetime of a [`GameSession`](super::GameSession).
///
/// Missing fields fall back to the defaults of a classic 10×20 game:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "rows": 12, "seed": 7 }"#).unwrap();
/// assert_eq!(config.rows, 12);
/// assert_eq!(config.cols, 10);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.points_per_line, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of board rows.
    pub rows: usize,
    /// Number of board columns.
    pub cols: usize,
    /// Seed for piece generation. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Gravity interval in milliseconds.
    pub drop_interval_ms: u64,
    /// Score awarded per cleared row.
    pub points_per_line: usize,
    /// How the next piece type is chosen.
    pub randomizer: Randomizer,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            seed: None,
            drop_interval_ms: Self::DEFAULT_DROP_INTERVAL_MS,
            points_per_line: Self::DEFAULT_POINTS_PER_LINE,
            randomizer: Randomizer::default(),
        }
    }
}

impl GameConfig {
    pub const DEFAULT_ROWS: usize = 20;
    pub const DEFAULT_COLS: usize = 10;
    pub const DEFAULT_DROP_INTERVAL_MS: u64 = 500;
    pub const DEFAULT_POINTS_PER_LINE: usize = 100;

    /// Checks that a board of the configured size can be created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::new(self.rows, self.cols).map(drop)
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.drop_interval(), Duration::from_millis(500));
        assert_eq!(config.randomizer, Randomizer::Uniform);
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        let config = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRows));

        let config = GameConfig {
            cols: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroColumns));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            rows: 16,
            cols: 8,
            seed: Some(42),
            drop_interval_ms: 250,
            points_per_line: 40,
            randomizer: Randomizer::SevenBag,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""randomizer":"seven-bag""#), "{json}");
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "colums": 10 }"#).is_err());
    }
}
