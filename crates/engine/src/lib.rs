//! Puzzle engine - drives one level from first tap to a terminal outcome
//!
//! # Module Structure
//!
//! - [`engine`]: the [`GameEngine`] state machine and its snapshot
//! - [`listener`]: [`GameListener`] notifications plus the [`EventRecorder`]
//! - [`settle`]: settle requests and tickets for the animation collaborator
//!
//! # Turn flow
//!
//! ```text
//! Idle --select x2--> SwappingValid --settle--> Resolving --settle--> Falling
//!                          |                        ^                    |
//!                          v                        +---- cascade -------+
//!                   SwappingInvalid --settle--> Idle          |
//!                                                             v
//!                                     LevelComplete / GameOver / NoMoves / Idle
//! ```
//!
//! # Example
//!
//! ```
//! use crush_core::{Board, Level};
//! use crush_engine::{EventRecorder, GameEngine};
//! use crush_types::{GamePhase, Position};
//!
//! let board = Board::from_layout(&["GBG", "BGB", "ORO", "RPR"], 1).unwrap();
//! let level = Level::new(1, 500, 30, 500, 800, 1200);
//! let mut engine = GameEngine::with_board(level, board, EventRecorder::new());
//!
//! engine.select(Position::new(2, 1));
//! engine.select(Position::new(3, 1));
//! assert_eq!(engine.phase(), GamePhase::SwappingValid);
//!
//! // An instant animation layer hands every ticket straight back.
//! engine.settle_all();
//! assert!(engine.score() >= 30);
//! assert_eq!(engine.moves_remaining(), 29);
//! ```

pub mod engine;
pub mod listener;
pub mod settle;

pub use engine::{GameEngine, GameSnapshot};
pub use listener::{EventRecorder, GameEvent, GameListener, NullListener};
pub use settle::{FallingToken, SettleKind, SettleRequest, SettleTicket, SwapMotion};
