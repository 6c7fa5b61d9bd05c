//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board and every rule that acts on it. It has **no
//! dependencies** on UI, storage, or timing, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Boards can be built from text layouts and refills scripted
//! - **Portable**: Runs headless, under a renderer, or in a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: Sized candy grid with generation, gravity, refill and hints
//! - [`matcher`]: Run detection and merging into connected matches
//! - [`scoring`]: Per-match points and combo multipliers
//! - [`level`]: Level definitions and the standard 25-level catalog
//! - [`rng`]: Seeded candy source with scriptable refills
//! - [`config`]: Board parameters, loadable from the environment
//! - [`snapshot`]: Serializable plain-data board copy
//!
//! # Game Rules
//!
//! - **Swaps**: Two orthogonally adjacent candies may be swapped; a swap that
//!   forms no run of three is reverted
//! - **Matches**: Straight runs of 3+ equal kinds; touching runs of the same
//!   kind merge (L, T and plus shapes score as one match)
//! - **Scoring**: 3 → 30, 4 → 60, 5+ → 100, times the combo multiplier
//! - **Cascades**: Removed cells fall, new candies drop in from above, and any
//!   new matches resolve at the next multiplier
//!
//! # Example
//!
//! ```
//! use crush_core::{matcher, Board};
//! use crush_types::Position;
//!
//! let mut board = Board::from_layout(&["RGR", "GRB", "BYY"], 7).unwrap();
//! assert!(matcher::find_all_matches(&board).is_empty());
//!
//! // Move the red at (1,1) up into row 0.
//! board.swap(Position::new(0, 1), Position::new(1, 1));
//! let matches = matcher::find_all_matches(&board);
//! assert_eq!(matches.len(), 1);
//!
//! let points = board.remove_matches(&matches);
//! assert_eq!(points, 30);
//! board.apply_gravity();
//! board.fill_empty_spaces();
//! assert!(board.is_full());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod level;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use crush_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Movement};
pub use config::BoardConfig;
pub use error::{BoardError, CatalogError};
pub use level::{Level, LevelCatalog, StarThresholds, STANDARD_LEVELS};
pub use matcher::{find_all_matches, Match};
pub use rng::{CandyFeed, SimpleRng};
pub use scoring::{calculate_score, match_score, ScoreResult};
pub use snapshot::BoardSnapshot;
