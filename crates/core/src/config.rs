//! Board configuration, loadable from environment variables.

use crate::types::{CandyKind, BOARD_COLS, BOARD_ROWS};

/// Default cap on whole-board regenerations.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 100;

/// Parameters for generating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Palette size: the first `kinds` entries of [`CandyKind::ALL`].
    pub kinds: usize,
    pub seed: u32,
    pub max_attempts: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            kinds: CandyKind::ALL.len(),
            seed: 1,
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }
}

impl BoardConfig {
    /// Create from environment variables
    ///
    /// - `CRUSH_BOARD_ROWS` / `CRUSH_BOARD_COLS`: grid size (default 8x8)
    /// - `CRUSH_CANDY_KINDS`: palette size (default 6)
    /// - `CRUSH_SEED`: RNG seed (default 1)
    /// - `CRUSH_MAX_GENERATION_ATTEMPTS`: regeneration cap (default 100)
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            rows: parsed("CRUSH_BOARD_ROWS").unwrap_or(defaults.rows),
            cols: parsed("CRUSH_BOARD_COLS").unwrap_or(defaults.cols),
            kinds: parsed("CRUSH_CANDY_KINDS").unwrap_or(defaults.kinds),
            seed: parsed("CRUSH_SEED").unwrap_or(defaults.seed),
            max_attempts: parsed("CRUSH_MAX_GENERATION_ATTEMPTS")
                .unwrap_or(defaults.max_attempts),
        }
    }

    /// Same config with a different seed
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }
}
