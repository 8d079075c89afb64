use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Board, BoardSizeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{_0}")]
    BoardSize(BoardSizeError),
    #[display("lookahead must be at least 1")]
    ZeroLookahead,
    #[display("initial tick interval must be positive")]
    ZeroInterval,
}

/// Construction-time settings of a game session.
///
/// A `GameConfig` is always valid: it can only be obtained through
/// [`GameConfig::new`], [`Default`] or deserialization, all of which validate.
/// Missing fields in a deserialized config take their default values.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "rows": 12, "cols": 6 }"#).unwrap();
/// assert_eq!((config.rows(), config.cols()), (12, 6));
/// assert_eq!(config.initial_interval_ms(), 500);
///
/// assert!(GameConfig::new(20, 0, 500, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: usize,
    cols: usize,
    initial_interval_ms: u64,
    lookahead: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GameConfig {
    /// Standard 20×10 board, 500 ms initial tick, three upcoming pieces.
    pub const DEFAULT: Self = Self {
        rows: 20,
        cols: 10,
        initial_interval_ms: 500,
        lookahead: 3,
    };

    pub fn new(
        rows: usize,
        cols: usize,
        initial_interval_ms: u64,
        lookahead: usize,
    ) -> Result<Self, ConfigError> {
        Board::check_size(rows, cols).map_err(ConfigError::BoardSize)?;
        if lookahead == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        if initial_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            rows,
            cols,
            initial_interval_ms,
            lookahead,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn initial_interval_ms(&self) -> u64 {
        self.initial_interval_ms
    }

    #[must_use]
    pub const fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    /// Number of upcoming pieces kept in the queue.
    #[must_use]
    pub const fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub(crate) fn empty_board(&self) -> Board {
        Board::new(self.rows, self.cols).expect("config dimensions are validated")
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawGameConfig {
    rows: usize,
    cols: usize,
    initial_interval_ms: u64,
    lookahead: usize,
}

impl Default for RawGameConfig {
    fn default() -> Self {
        let GameConfig {
            rows,
            cols,
            initial_interval_ms,
            lookahead,
        } = GameConfig::DEFAULT;
        Self {
            rows,
            cols,
            initial_interval_ms,
            lookahead,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols, raw.initial_interval_ms, raw.lookahead)
    }
}
