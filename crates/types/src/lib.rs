//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, state machine, persistence, front-ends).
//!
//! # Board Dimensions
//!
//! The reference playfield is a square grid:
//!
//! - **Rows**: 8 (indexed 0-7, row 0 is the top)
//! - **Columns**: 8 (indexed 0-7, column 0 is the left edge)
//! - Gravity pulls candies toward the highest row index.
//!
//! # Match Scoring
//!
//! | Match size | Points |
//! |------------|--------|
//! | 3 | 30 |
//! | 4 | 60 |
//! | 5+ | 100 |
//!
//! Points earned by a cascade step are multiplied by the combo multiplier
//! (1 for the player's swap, 2 for the first cascade, 3 for the next...).
//!
//! # Examples
//!
//! ```
//! use crush_types::{CandyKind, Position, BOARD_COLS, BOARD_ROWS};
//!
//! // Parse from string (case-insensitive)
//! let parsed = CandyKind::from_str("red").unwrap();
//! assert_eq!(parsed, CandyKind::Red);
//!
//! // Single-character layout codes
//! assert_eq!(CandyKind::from_char('g'), Some(CandyKind::Green));
//!
//! // Four-directional adjacency
//! let a = Position::new(3, 3);
//! assert!(a.is_adjacent(Position::new(3, 4)));
//! assert!(!a.is_adjacent(Position::new(4, 4)));
//!
//! assert_eq!(BOARD_ROWS, 8);
//! assert_eq!(BOARD_COLS, 8);
//! ```

/// Default board height in cells (8 rows)
pub const BOARD_ROWS: usize = 8;

/// Default board width in cells (8 columns)
pub const BOARD_COLS: usize = 8;

/// Minimum run length that counts as a match
pub const MIN_MATCH: usize = 3;

/// Points for a match of exactly 3 candies
pub const MATCH_SCORE_THREE: u32 = 30;

/// Points for a match of exactly 4 candies
pub const MATCH_SCORE_FOUR: u32 = 60;

/// Points for a match of 5 or more candies (including merged L/T/plus shapes)
pub const MATCH_SCORE_FIVE_PLUS: u32 = 100;

/// Combo multiplier applied to the player's own swap
pub const BASE_COMBO_MULTIPLIER: u32 = 1;

/// Idle time after which the presentation layer shows a hint (5s).
///
/// The engine never schedules this itself; front-ends poll
/// the engine's idle predicate once the delay has elapsed.
pub const HINT_IDLE_MS: u32 = 5000;

/// The six candy kinds
///
/// Matching is pure equality on the kind; there are no special candies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CandyKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl CandyKind {
    /// Every kind, in palette order
    pub const ALL: [CandyKind; 6] = [
        CandyKind::Red,
        CandyKind::Orange,
        CandyKind::Yellow,
        CandyKind::Green,
        CandyKind::Blue,
        CandyKind::Purple,
    ];

    /// Parse candy kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use crush_types::CandyKind;
    ///
    /// assert_eq!(CandyKind::from_str("Blue"), Some(CandyKind::Blue));
    /// assert_eq!(CandyKind::from_str("p"), Some(CandyKind::Purple));
    /// assert_eq!(CandyKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(CandyKind::Red),
            "orange" | "o" => Some(CandyKind::Orange),
            "yellow" | "y" => Some(CandyKind::Yellow),
            "green" | "g" => Some(CandyKind::Green),
            "blue" | "b" => Some(CandyKind::Blue),
            "purple" | "p" => Some(CandyKind::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CandyKind::Red => "red",
            CandyKind::Orange => "orange",
            CandyKind::Yellow => "yellow",
            CandyKind::Green => "green",
            CandyKind::Blue => "blue",
            CandyKind::Purple => "purple",
        }
    }

    /// Parse a single layout character (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(CandyKind::Red),
            'O' => Some(CandyKind::Orange),
            'Y' => Some(CandyKind::Yellow),
            'G' => Some(CandyKind::Green),
            'B' => Some(CandyKind::Blue),
            'P' => Some(CandyKind::Purple),
            _ => None,
        }
    }

    /// Uppercase layout character
    pub fn as_char(&self) -> char {
        match self {
            CandyKind::Red => 'R',
            CandyKind::Orange => 'O',
            CandyKind::Yellow => 'Y',
            CandyKind::Green => 'G',
            CandyKind::Blue => 'B',
            CandyKind::Purple => 'P',
        }
    }

    /// Index into [`CandyKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A candy occupying a board cell
///
/// `matched` and `is_new` are presentation signals only: the core sets them
/// (on removal and on refill respectively) but never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candy {
    pub kind: CandyKind,
    pub matched: bool,
    pub is_new: bool,
}

impl Candy {
    /// A settled candy of the given kind
    pub fn new(kind: CandyKind) -> Self {
        Self {
            kind,
            matched: false,
            is_new: false,
        }
    }

    /// A candy that just entered the board from above
    pub fn spawned(kind: CandyKind) -> Self {
        Self {
            kind,
            matched: false,
            is_new: true,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell (only between match removal and refill)
/// - `Some(Candy)`: Occupied cell
pub type Cell = Option<Candy>;

/// Grid coordinate, row 0 at the top
///
/// Ordering is row-major, which is also the scan order used for hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True iff the Manhattan distance is exactly 1 (no diagonals)
    ///
    /// # Examples
    ///
    /// ```
    /// use crush_types::Position;
    ///
    /// let p = Position::new(2, 2);
    /// assert!(p.is_adjacent(Position::new(1, 2)));
    /// assert!(p.is_adjacent(Position::new(2, 1)));
    /// assert!(!p.is_adjacent(Position::new(3, 3)));
    /// assert!(!p.is_adjacent(p));
    /// ```
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// In-bounds four-directional neighbours (up, down, left, right)
    pub fn neighbors(&self, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        let Position { row, col } = *self;
        let up = row.checked_sub(1).map(|r| Position::new(r, col));
        let down = (row + 1 < rows).then(|| Position::new(row + 1, col));
        let left = col.checked_sub(1).map(|c| Position::new(row, c));
        let right = (col + 1 < cols).then(|| Position::new(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }
}

/// A candy together with the cell it occupies
///
/// Tokens are views produced by the board from its row-major storage, so the
/// position always equals the grid cell the candy lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub position: Position,
    pub candy: Candy,
}

/// Puzzle engine phases
///
/// Exactly one phase is active at a time. `LevelComplete`, `GameOver` and
/// `NoMoves` are terminal and end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Waiting for player input
    Idle,
    /// Two cells were swapped; waiting for the swap to settle
    SwappingValid,
    /// The swap produced no match and is being reverted
    SwappingInvalid,
    /// Matches are being cleared
    Resolving,
    /// Candies are falling into place after a clear
    Falling,
    LevelComplete,
    GameOver,
    NoMoves,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GamePhase::LevelComplete | GamePhase::GameOver | GamePhase::NoMoves
        )
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::SwappingValid => "swappingValid",
            GamePhase::SwappingInvalid => "swappingInvalid",
            GamePhase::Resolving => "resolving",
            GamePhase::Falling => "falling",
            GamePhase::LevelComplete => "levelComplete",
            GamePhase::GameOver => "gameOver",
            GamePhase::NoMoves => "noMoves",
        }
    }
}
