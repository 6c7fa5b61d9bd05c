//! Match detection
//!
//! Detection runs in two passes over a board:
//!
//! 1. [`find_runs`] scans every row, then every column, for maximal straight
//!    runs of at least three equal kinds.
//! 2. [`merge_runs`] marks every run cell with its kind and flood-fills the
//!    marked cells (4-neighbour, same kind), so runs that touch or cross
//!    (L, T and plus shapes) become a single match.
//!
//! The result is one [`Match`] per connected component, each scored once by
//! its total size.

use crate::board::Board;
use crate::scoring::match_score;
use crate::types::{CandyKind, Position, MIN_MATCH};

/// A connected group of three or more same-kind candies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    /// Sorted row-major, no duplicates
    positions: Vec<Position>,
    kind: CandyKind,
}

impl Match {
    pub fn new<I: IntoIterator<Item = Position>>(positions: I, kind: CandyKind) -> Self {
        let mut positions: Vec<Position> = positions.into_iter().collect();
        positions.sort_unstable();
        positions.dedup();
        Self { positions, kind }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn kind(&self) -> CandyKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Table points for this match alone
    pub fn score(&self) -> u32 {
        match_score(self.size())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }
}

/// Every maximal horizontal run, then every maximal vertical run
///
/// Runs are not merged: a cell at the corner of an L appears in two runs.
pub fn find_runs(board: &Board) -> Vec<Match> {
    let mut runs = Vec::new();

    for row in 0..board.rows() {
        scan_line(board, board.cols(), |i| Position::new(row, i), &mut runs);
    }
    for col in 0..board.cols() {
        scan_line(board, board.rows(), |i| Position::new(i, col), &mut runs);
    }

    runs
}

fn scan_line<F>(board: &Board, len: usize, at: F, out: &mut Vec<Match>)
where
    F: Fn(usize) -> Position,
{
    let mut start = 0;
    while start < len {
        let Some(kind) = board.kind_at(at(start)) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < len && board.kind_at(at(end)) == Some(kind) {
            end += 1;
        }

        if end - start >= MIN_MATCH {
            out.push(Match::new((start..end).map(&at), kind));
        }
        start = end;
    }
}

/// Merge overlapping or adjacent same-kind runs into connected components
///
/// Only cells covered by some run take part. Components smaller than three
/// are dropped (they cannot arise from detector runs).
pub fn merge_runs(board: &Board, runs: &[Match]) -> Vec<Match> {
    let (rows, cols) = (board.rows(), board.cols());
    let index = |p: Position| p.row * cols + p.col;

    let mut covered: Vec<Option<CandyKind>> = vec![None; rows * cols];
    for run in runs {
        for &p in run.positions() {
            if p.row < rows && p.col < cols {
                covered[index(p)] = Some(run.kind());
            }
        }
    }

    let mut visited = vec![false; rows * cols];
    let mut merged = Vec::new();

    for run in runs {
        for &start in run.positions() {
            if start.row >= rows || start.col >= cols || visited[index(start)] {
                continue;
            }

            visited[index(start)] = true;
            let mut component = Vec::new();
            let mut stack = vec![start];

            while let Some(p) = stack.pop() {
                component.push(p);
                for n in p.neighbors(rows, cols) {
                    let i = index(n);
                    if !visited[i] && covered[i] == Some(run.kind()) {
                        visited[i] = true;
                        stack.push(n);
                    }
                }
            }

            if component.len() >= MIN_MATCH {
                merged.push(Match::new(component, run.kind()));
            }
        }
    }

    merged
}

/// All matches on the board, merged
pub fn find_all_matches(board: &Board) -> Vec<Match> {
    merge_runs(board, &find_runs(board))
}

/// True if the board holds at least one run of three
///
/// Early-exit scan; cheaper than [`find_all_matches`] for the hint search.
pub fn has_any_match(board: &Board) -> bool {
    let line_has_run = |len: usize, at: &dyn Fn(usize) -> Position| {
        let mut streak = 0;
        let mut prev = None;
        for i in 0..len {
            let kind = board.kind_at(at(i));
            if kind.is_some() && kind == prev {
                streak += 1;
            } else {
                streak = 1;
            }
            if kind.is_some() && streak >= MIN_MATCH {
                return true;
            }
            prev = kind;
        }
        false
    };

    (0..board.rows()).any(|row| line_has_run(board.cols(), &|i| Position::new(row, i)))
        || (0..board.cols()).any(|col| line_has_run(board.rows(), &|i| Position::new(i, col)))
}

/// Matches that include at least one of `positions`
pub fn find_matches_at(board: &Board, positions: &[Position]) -> Vec<Match> {
    find_all_matches(board)
        .into_iter()
        .filter(|m| positions.iter().any(|&p| m.contains(p)))
        .collect()
}
