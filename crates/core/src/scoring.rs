//! Scoring module - match points and cascade combo multipliers
//!
//! - A match is worth a fixed amount by size: 3 → 30, 4 → 60, 5+ → 100.
//! - A cascade step's points are the sum of its matches' points times the
//!   combo multiplier (1 for the player's swap, +1 for every completed fall).

use crate::types::{
    BASE_COMBO_MULTIPLIER, MATCH_SCORE_FIVE_PLUS, MATCH_SCORE_FOUR, MATCH_SCORE_THREE, MIN_MATCH,
};

/// Score calculation result for one cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Sum of the removed matches' table points.
    pub base: u32,
    /// Combo multiplier in effect for this step.
    pub multiplier: u32,
    /// `base * multiplier`, the amount added to the running score.
    pub total: u32,
}

/// Points for a single match of `size` candies
///
/// Sizes below the minimum run length score nothing; they never come out of
/// the match detector.
pub fn match_score(size: usize) -> u32 {
    match size {
        s if s >= 5 => MATCH_SCORE_FIVE_PLUS,
        4 => MATCH_SCORE_FOUR,
        s if s >= MIN_MATCH => MATCH_SCORE_THREE,
        _ => 0,
    }
}

/// Apply the combo multiplier to a cascade step's base points
pub fn calculate_score(base: u32, multiplier: u32) -> ScoreResult {
    let multiplier = multiplier.max(BASE_COMBO_MULTIPLIER);
    ScoreResult {
        base,
        multiplier,
        total: base.saturating_mul(multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_score_table() {
        assert_eq!(match_score(3), 30);
        assert_eq!(match_score(4), 60);
        assert_eq!(match_score(5), 100);
        assert_eq!(match_score(9), 100);
    }

    #[test]
    fn test_short_runs_score_nothing() {
        assert_eq!(match_score(0), 0);
        assert_eq!(match_score(2), 0);
    }

    #[test]
    fn test_combo_multiplier_applies_to_base() {
        let first = calculate_score(30, 1);
        assert_eq!(first.total, 30);

        let second = calculate_score(30, 2);
        assert_eq!(second.base, 30);
        assert_eq!(second.multiplier, 2);
        assert_eq!(second.total, 60);
    }

    #[test]
    fn test_multiplier_floor_is_one() {
        assert_eq!(calculate_score(60, 0).total, 60);
    }

    #[test]
    fn test_score_saturates() {
        assert_eq!(calculate_score(u32::MAX, 3).total, u32::MAX);
    }
}
