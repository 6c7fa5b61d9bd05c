//! Property tests over random seeds and random grids

use proptest::prelude::*;

use crush::core::matcher::{find_all_matches, find_runs};
use crush::core::{match_score, Board, BoardConfig};
use crush::types::{Candy, CandyKind, Cell, Position};

/// Strategy: a full `rows x cols` board over the first `kinds` kinds.
fn arb_board(kinds: usize) -> impl Strategy<Value = Board> {
    (2usize..=6, 2usize..=6).prop_flat_map(move |(rows, cols)| {
        proptest::collection::vec(0..kinds, rows * cols).prop_map(move |idx| {
            let cells: Vec<Cell> = idx
                .into_iter()
                .map(|i| Some(Candy::new(CandyKind::ALL[i])))
                .collect();
            Board::from_cells(rows, cols, cells, 1).unwrap()
        })
    })
}

/// Strategy: the same, with some cells left empty.
fn arb_holey_board() -> impl Strategy<Value = Board> {
    (2usize..=6, 2usize..=6).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::option::of(0usize..4), rows * cols).prop_map(
            move |idx| {
                let cells: Vec<Cell> = idx
                    .into_iter()
                    .map(|i| i.map(|i| Candy::new(CandyKind::ALL[i])))
                    .collect();
                Board::from_cells(rows, cols, cells, 1).unwrap()
            },
        )
    })
}

/// Try every adjacent pair in both directions on a copy.
fn oracle_has_move(board: &Board) -> bool {
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let here = Position::new(row, col);
            for other in here.neighbors(board.rows(), board.cols()) {
                let mut copy = board.clone();
                copy.swap(here, other);
                if !find_all_matches(&copy).is_empty() {
                    return true;
                }
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn prop_fresh_boards_have_no_matches(seed in any::<u32>(), kinds in 4usize..=6) {
        let config = BoardConfig { kinds, seed, ..BoardConfig::default() };
        let board = Board::new(&config).unwrap();
        prop_assert!(find_all_matches(&board).is_empty());
        prop_assert!(board.has_valid_moves());
    }

    #[test]
    fn prop_same_seed_same_board(seed in any::<u32>()) {
        let a = Board::with_seed(seed).unwrap();
        let b = Board::with_seed(seed).unwrap();
        prop_assert_eq!(a.to_layout(), b.to_layout());
    }

    #[test]
    fn prop_gravity_then_fill_leaves_no_empties(board in arb_holey_board()) {
        let mut board = board;
        let before = board.tokens().count();
        let moves = board.apply_gravity();
        prop_assert_eq!(board.tokens().count(), before);
        prop_assert!(moves.iter().all(|m| m.to.col == m.from.col && m.to.row > m.from.row));

        let filled = board.fill_empty_spaces();
        prop_assert_eq!(before + filled.len(), board.rows() * board.cols());
        prop_assert!(board.is_full());
    }

    #[test]
    fn prop_gravity_leaves_no_gaps_below_candies(board in arb_holey_board()) {
        let mut board = board;
        board.apply_gravity();
        for col in 0..board.cols() {
            let mut seen_candy = false;
            for row in 0..board.rows() {
                let occupied = board.kind_at(Position::new(row, col)).is_some();
                prop_assert!(!(seen_candy && !occupied), "gap under a candy in column {}", col);
                seen_candy |= occupied;
            }
        }
    }

    #[test]
    fn prop_remove_score_is_sum_over_records(board in arb_board(3)) {
        let mut board = board;
        let runs = find_runs(&board);
        let expected: u32 = runs.iter().map(|m| match_score(m.size())).sum();
        prop_assert_eq!(board.remove_matches(&runs), expected);
    }

    #[test]
    fn prop_merged_matches_are_disjoint(board in arb_board(3)) {
        let matches = find_all_matches(&board);
        let mut seen = std::collections::HashSet::new();
        for m in &matches {
            prop_assert!(m.size() >= 3);
            for &p in m.positions() {
                prop_assert!(seen.insert(p), "{:?} in two matches", p);
                prop_assert_eq!(board.kind_at(p), Some(m.kind()));
            }
        }
    }

    #[test]
    fn prop_has_valid_moves_matches_oracle(board in arb_board(4)) {
        prop_assert_eq!(board.has_valid_moves(), oracle_has_move(&board));
    }

    #[test]
    fn prop_hint_is_a_working_swap(board in arb_board(4)) {
        if let Some((a, b)) = board.find_hint() {
            prop_assert!(a.is_adjacent(b));
            let mut copy = board.clone();
            copy.swap(a, b);
            prop_assert!(!find_all_matches(&copy).is_empty());
        }
    }
}
