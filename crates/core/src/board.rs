//! Board module - manages the candy grid
//!
//! The board is a `rows x cols` grid where each cell holds a candy or, only
//! transiently between match removal and refill, nothing.
//! Uses a flat row-major array; candies carry no coordinates of their own, so
//! a candy's position is always the index it is stored at.
//! Coordinates: (row, col) where row 0 is the top and gravity pulls toward the
//! highest row index.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::matcher::{self, Match};
use crate::rng::CandyFeed;
use crate::snapshot::BoardSnapshot;
use crate::types::{Candy, CandyKind, Cell, Position, Token, MIN_MATCH};

/// Smallest palette that can always avoid pre-made runs during generation.
const MIN_PALETTE: usize = MIN_MATCH;

/// One candy moved by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movement {
    pub from: Position,
    pub to: Position,
}

impl Movement {
    /// Number of rows fallen
    pub fn distance(&self) -> usize {
        self.to.row.saturating_sub(self.from.row)
    }
}

/// The game board - flat array storage, row-major
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
    feed: CandyFeed,
    /// Tokens taken off the board by the last `remove_matches`
    cleared: Vec<Token>,
}

impl Board {
    /// Generate a playable board
    ///
    /// Cells are filled in row-major order, each with a random kind that does
    /// not complete a run of three with the two cells to its left or the two
    /// cells above it. The whole board is regenerated while it still contains
    /// a match or offers no legal swap, up to `config.max_attempts` times.
    pub fn new(config: &BoardConfig) -> Result<Self, BoardError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(BoardError::InvalidDimensions {
                rows: config.rows,
                cols: config.cols,
            });
        }
        if !(MIN_PALETTE..=CandyKind::ALL.len()).contains(&config.kinds) {
            return Err(BoardError::InvalidPalette(config.kinds));
        }

        let feed = CandyFeed::new(config.kinds, config.seed);
        let mut board = Self::empty(config.rows, config.cols, feed);

        for attempt in 1..=config.max_attempts {
            board.fill_without_runs();
            if !matcher::has_any_match(&board) && board.has_valid_moves() {
                debug!(attempt, rows = board.rows, cols = board.cols, "board generated");
                return Ok(board);
            }
            debug!(attempt, "generated board rejected, regenerating");
        }

        Err(BoardError::GenerationExhausted {
            attempts: config.max_attempts,
        })
    }

    /// Generate a default 8x8, six-kind board from a seed
    pub fn with_seed(seed: u32) -> Result<Self, BoardError> {
        Self::new(&BoardConfig::default().with_seed(seed))
    }

    /// Build a board from explicit cells (row-major)
    ///
    /// Refills draw from the full six-kind palette seeded with `seed`.
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Cell>,
        seed: u32,
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || cells.len() != rows * cols {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        let mut board = Self::empty(rows, cols, CandyFeed::new(CandyKind::ALL.len(), seed));
        board.cells = cells;
        Ok(board)
    }

    /// Build a board from text rows
    ///
    /// Each character is a kind code (`R O Y G B P`, case-insensitive) or `.`
    /// for an empty cell; whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use crush_core::Board;
    /// use crush_types::{CandyKind, Position};
    ///
    /// let board = Board::from_layout(&["RGB", "G.B"], 1).unwrap();
    /// assert_eq!(board.kind_at(Position::new(0, 1)), Some(CandyKind::Green));
    /// assert_eq!(board.kind_at(Position::new(1, 1)), None);
    /// ```
    pub fn from_layout(layout: &[&str], seed: u32) -> Result<Self, BoardError> {
        let mut cells = Vec::new();
        let mut cols = 0;

        for (row, line) in layout.iter().enumerate() {
            let mut width = 0;
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = if c == '.' {
                    None
                } else {
                    let kind = CandyKind::from_char(c).ok_or_else(|| BoardError::Layout {
                        row,
                        reason: format!("unknown candy code '{}'", c),
                    })?;
                    Some(Candy::new(kind))
                };
                cells.push(cell);
                width += 1;
            }

            if row == 0 {
                cols = width;
            } else if width != cols {
                return Err(BoardError::Layout {
                    row,
                    reason: format!("expected {} cells, found {}", cols, width),
                });
            }
        }

        Self::from_cells(layout.len(), cols, cells, seed)
    }

    fn empty(rows: usize, cols: usize, feed: CandyFeed) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            feed,
            cleared: Vec::new(),
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    #[inline(always)]
    fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.cols, index % self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Kinds this board draws from
    pub fn palette(&self) -> &[CandyKind] {
        self.feed.palette()
    }

    /// Current RNG state, for reproducing later refills
    pub fn seed(&self) -> u32 {
        self.feed.seed()
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Kind of the candy at `pos`, None if empty or out of bounds
    pub fn kind_at(&self, pos: Position) -> Option<CandyKind> {
        self.get(pos).flatten().map(|candy| candy.kind)
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells
    ///
    /// No legality check is made here. Returns false (and changes nothing)
    /// if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Remove every position covered by `matches`
    ///
    /// Overlapping positions are removed once, but the returned score is the
    /// sum of each match record's own score: a cell shared by two distinct
    /// records counts toward both. Detector output is already merged, so this
    /// only shows when callers pass unmerged runs.
    ///
    /// Removed candies are flagged `matched` and kept for [`Board::take_cleared`].
    pub fn remove_matches(&mut self, matches: &[Match]) -> u32 {
        let mut total: u32 = 0;
        let mut marked = vec![false; self.cells.len()];

        for m in matches {
            total = total.saturating_add(m.score());
            for &pos in m.positions() {
                if let Some(idx) = self.index(pos) {
                    marked[idx] = true;
                }
            }
        }

        self.cleared.clear();
        for (idx, _) in marked.iter().enumerate().filter(|(_, m)| **m) {
            if let Some(mut candy) = self.cells[idx].take() {
                candy.matched = true;
                self.cleared.push(Token {
                    position: self.position_of(idx),
                    candy,
                });
            }
        }

        total
    }

    /// Take the tokens removed by the last `remove_matches`
    pub fn take_cleared(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.cleared)
    }

    /// Compact every column downward, preserving order
    /// Uses a two-pointer pass per column
    /// Returns one movement per candy that changed rows
    pub fn apply_gravity(&mut self) -> Vec<Movement> {
        let mut movements = Vec::new();

        for col in 0..self.cols {
            let mut write_row = self.rows;

            for row in (0..self.rows).rev() {
                let read = row * self.cols + col;
                if self.cells[read].is_none() {
                    continue;
                }

                write_row -= 1;
                if write_row != row {
                    let write = write_row * self.cols + col;
                    self.cells[write] = self.cells[read].take();
                    movements.push(Movement {
                        from: Position::new(row, col),
                        to: Position::new(write_row, col),
                    });
                }
            }
        }

        movements
    }

    /// Fill every empty cell with a new candy, flagged `is_new`
    ///
    /// Columns are processed left to right, each top to bottom. A new candy
    /// at row `r` conceptually falls `r + 1` rows from above the board.
    pub fn fill_empty_spaces(&mut self) -> Vec<Position> {
        let mut filled = Vec::new();

        for col in 0..self.cols {
            for row in 0..self.rows {
                let idx = row * self.cols + col;
                if self.cells[idx].is_none() {
                    let kind = self.feed.draw();
                    self.cells[idx] = Some(Candy::spawned(kind));
                    filled.push(Position::new(row, col));
                }
            }
        }

        filled
    }

    /// Script the kinds the next refills will use, in draw order
    pub fn queue_refill<I: IntoIterator<Item = CandyKind>>(&mut self, kinds: I) {
        self.feed.queue(kinds);
    }

    /// Clear the `is_new` flag on every candy once the fall has settled
    pub fn settle_new_flags(&mut self) {
        for candy in self.cells.iter_mut().flatten() {
            candy.is_new = false;
        }
    }

    /// True if some single adjacent swap would create a match
    pub fn has_valid_moves(&self) -> bool {
        self.find_hint().is_some()
    }

    /// First swap that would create a match
    ///
    /// Scans cells in row-major order and tries the right neighbour before the
    /// bottom neighbour; that order is the tie-break for hints. Each trial
    /// swaps, runs the detector, and swaps back on a scratch copy.
    pub fn find_hint(&self) -> Option<(Position, Position)> {
        let mut scratch = Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.clone(),
            feed: CandyFeed::default(),
            cleared: Vec::new(),
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Position::new(row, col);

                if col + 1 < self.cols {
                    let right = Position::new(row, col + 1);
                    if scratch.swap_creates_match(here, right) {
                        return Some((here, right));
                    }
                }

                if row + 1 < self.rows {
                    let below = Position::new(row + 1, col);
                    if scratch.swap_creates_match(here, below) {
                        return Some((here, below));
                    }
                }
            }
        }

        None
    }

    fn swap_creates_match(&mut self, a: Position, b: Position) -> bool {
        self.swap(a, b);
        let hit = matcher::has_any_match(self);
        self.swap(a, b);
        hit
    }

    /// All candies on the board, in row-major order
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|candy| Token {
                position: self.position_of(idx),
                candy,
            })
        })
    }

    /// Positioned candy at `pos`
    pub fn token(&self, pos: Position) -> Option<Token> {
        self.get(pos)
            .flatten()
            .map(|candy| Token { position: pos, candy })
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text rows in the `from_layout` format
    pub fn to_layout(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |candy| candy.kind.as_char()))
                    .collect()
            })
            .collect()
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.rows;
        out.cols = self.cols;
        out.cells.clear();
        out.cells.extend(self.cells.chunks(self.cols).map(|row| {
            row.iter()
                .map(|cell| cell.map_or(0, |candy| candy.kind.index() as u8 + 1))
                .collect::<Vec<u8>>()
        }));
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Row-major fill that never completes a run with earlier cells
    fn fill_without_runs(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let mut excluded = ArrayVec::<CandyKind, 2>::new();

                if col >= 2 {
                    let left = self.kind_at(Position::new(row, col - 1));
                    if left.is_some() && left == self.kind_at(Position::new(row, col - 2)) {
                        excluded.extend(left);
                    }
                }

                if row >= 2 {
                    let up = self.kind_at(Position::new(row - 1, col));
                    if up.is_some() && up == self.kind_at(Position::new(row - 2, col)) {
                        excluded.extend(up);
                    }
                }

                let kind = self
                    .feed
                    .random_excluding(&excluded)
                    .unwrap_or_else(|| self.feed.random());
                self.cells[row * self.cols + col] = Some(Candy::new(kind));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::from_layout(&["RGB", "GBR"], 1).unwrap();
        assert_eq!(board.index(pos(0, 0)), Some(0));
        assert_eq!(board.index(pos(0, 2)), Some(2));
        assert_eq!(board.index(pos(1, 0)), Some(3));
        assert_eq!(board.index(pos(2, 0)), None);
        assert_eq!(board.index(pos(0, 3)), None);
    }

    #[test]
    fn test_layout_roundtrip() {
        let layout = ["RGB", "G.B", "YPO"];
        let board = Board::from_layout(&layout, 1).unwrap();
        assert_eq!(board.to_layout(), layout);
        assert_eq!(board.empty_count(), 1);
    }

    #[test]
    fn test_layout_rejects_ragged_rows() {
        let err = Board::from_layout(&["RGB", "GB"], 1).unwrap_err();
        assert!(matches!(err, BoardError::Layout { row: 1, .. }));
    }

    #[test]
    fn test_layout_rejects_unknown_codes() {
        let err = Board::from_layout(&["RGX"], 1).unwrap_err();
        assert!(matches!(err, BoardError::Layout { row: 0, .. }));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = BoardConfig {
            rows: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            Board::new(&config),
            Err(BoardError::InvalidDimensions { .. })
        ));

        let config = BoardConfig {
            kinds: 2,
            ..BoardConfig::default()
        };
        assert_eq!(Board::new(&config).unwrap_err(), BoardError::InvalidPalette(2));
    }

    #[test]
    fn test_generation_exhausted_on_tiny_board() {
        // A 1x2 board can never hold a run of three, so no swap is ever legal.
        let config = BoardConfig {
            rows: 1,
            cols: 2,
            max_attempts: 5,
            ..BoardConfig::default()
        };
        assert_eq!(
            Board::new(&config).unwrap_err(),
            BoardError::GenerationExhausted { attempts: 5 }
        );
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::with_seed(777).unwrap();
        let b = Board::with_seed(777).unwrap();
        assert_eq!(a.to_layout(), b.to_layout());
    }

    #[test]
    fn test_swap_out_of_bounds_is_noop() {
        let mut board = Board::from_layout(&["RG"], 1).unwrap();
        assert!(!board.swap(pos(0, 0), pos(0, 2)));
        assert_eq!(board.to_layout(), vec!["RG"]);
    }

    #[test]
    fn test_gravity_reports_fall_distances() {
        let mut board = Board::from_layout(&["R", ".", "G", "."], 1).unwrap();
        let moves = board.apply_gravity();

        assert_eq!(board.to_layout(), vec![".", ".", "R", "G"]);
        assert_eq!(
            moves,
            vec![
                Movement { from: pos(2, 0), to: pos(3, 0) },
                Movement { from: pos(0, 0), to: pos(2, 0) },
            ]
        );
        assert_eq!(moves[1].distance(), 2);
    }

    #[test]
    fn test_fill_flags_new_candies() {
        let mut board = Board::from_layout(&["..", "RG"], 3).unwrap();
        board.queue_refill([CandyKind::Blue, CandyKind::Purple]);
        let filled = board.fill_empty_spaces();

        assert_eq!(filled, vec![pos(0, 0), pos(0, 1)]);
        assert_eq!(board.to_layout(), vec!["BP", "RG"]);
        assert!(board.get(pos(0, 0)).flatten().unwrap().is_new);
        assert!(!board.get(pos(1, 0)).flatten().unwrap().is_new);

        board.settle_new_flags();
        assert!(board.tokens().all(|t| !t.candy.is_new));
    }

    #[test]
    fn test_removed_candies_are_flagged_matched() {
        let mut board = Board::from_layout(&["RRRG"], 1).unwrap();
        let matches = matcher::find_all_matches(&board);
        let score = board.remove_matches(&matches);

        assert_eq!(score, 30);
        assert_eq!(board.to_layout(), vec!["...G"]);

        let cleared = board.take_cleared();
        assert_eq!(cleared.len(), 3);
        assert!(cleared.iter().all(|t| t.candy.matched && t.candy.kind == CandyKind::Red));
        assert!(board.take_cleared().is_empty());
    }

    #[test]
    fn test_find_hint_scan_order() {
        let board = Board::from_layout(&["RRGR", "GGRG"], 1).unwrap();
        assert_eq!(board.find_hint(), Some((pos(0, 2), pos(0, 3))));
    }

    #[test]
    fn test_hint_prefers_right_before_down() {
        let board = Board::from_layout(&["GRR", "RBB", "BGG"], 1).unwrap();
        // Swapping (0,0) with its right neighbour does nothing; with the cell
        // below it completes row 0 as RRR.
        assert_eq!(board.find_hint(), Some((pos(0, 0), pos(1, 0))));
    }

    #[test]
    fn test_has_valid_moves_false_on_dead_board() {
        let board = Board::from_layout(&["RGBR", "GBRG", "BRGB"], 1).unwrap();
        assert!(!board.has_valid_moves());
        // The scan leaves the board untouched.
        assert_eq!(board.to_layout(), vec!["RGBR", "GBRG", "BRGB"]);
    }

    #[test]
    fn test_snapshot_encodes_kinds() {
        let board = Board::from_layout(&["R.", "PB"], 1).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cols, 2);
        assert_eq!(snap.cells, vec![vec![1, 0], vec![6, 5]]);
    }
}
