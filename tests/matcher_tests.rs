//! Match detector tests - runs, merging, and shapes

use crush::core::matcher::{find_all_matches, find_runs, has_any_match, merge_runs};
use crush::core::Board;
use crush::types::{CandyKind, Position};

fn board(layout: &[&str]) -> Board {
    Board::from_layout(layout, 1).unwrap()
}

#[test]
fn test_crossing_runs_form_one_match_of_five() {
    // Horizontal and vertical three sharing exactly one cell.
    let b = board(&["GBRYG", "YGRBY", "RRRGB", "BYGYG"]);
    let runs = find_runs(&b);
    assert_eq!(runs.len(), 2);

    let matches = find_all_matches(&b);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size(), 5);
    assert_eq!(matches[0].kind(), CandyKind::Red);
    assert_eq!(matches[0].score(), 100);
}

#[test]
fn test_t_shape() {
    let b = board(&["BBB", "GBG", "YBY"]);
    let matches = find_all_matches(&b);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size(), 5);
}

#[test]
fn test_run_of_six_scores_as_five_plus() {
    let b = board(&["OOOOOO"]);
    let matches = find_all_matches(&b);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size(), 6);
    assert_eq!(matches[0].score(), 100);
}

#[test]
fn test_different_kinds_do_not_merge() {
    // Red row above a green row, touching along their length.
    let b = board(&["RRR", "GGG", "BYB"]);
    let matches = find_all_matches(&b);
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.size() == 3));
}

#[test]
fn test_merge_is_independent_of_run_order() {
    let b = board(&["RGB", "RGB", "RRR"]);
    let mut runs = find_runs(&b);
    let forward = merge_runs(&b, &runs);
    runs.reverse();
    let backward = merge_runs(&b, &runs);
    assert_eq!(forward, backward);
}

#[test]
fn test_uncovered_same_kind_neighbours_stay_out() {
    // (1,0) is red and touches the run, but no run covers it.
    let b = board(&["RRRG", "RGBY", "GBYR"]);
    let matches = find_all_matches(&b);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].size(), 3);
    assert!(!matches[0].contains(Position::new(1, 0)));
}

#[test]
fn test_has_any_match_agrees_with_detector() {
    for layout in [
        &["RGB", "GBR", "BRG"][..],
        &["RRB", "GBR", "BRR"][..],
        &["RGB", "RBR", "RRG"][..],
        &["YYY"][..],
    ] {
        let b = board(layout);
        assert_eq!(
            has_any_match(&b),
            !find_all_matches(&b).is_empty(),
            "layout {:?}",
            layout
        );
    }
}
