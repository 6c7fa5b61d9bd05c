use serde::{Deserialize, Serialize};

use crate::types::{CandyKind, Position};

/// Plain-data copy of a board
///
/// Each cell is `0` for empty or the candy kind's index plus one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<u8>>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.cells.clear();
    }

    pub fn kind_at(&self, pos: Position) -> Option<CandyKind> {
        let code = *self.cells.get(pos.row)?.get(pos.col)?;
        let idx = (code as usize).checked_sub(1)?;
        CandyKind::ALL.get(idx).copied()
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| **c == 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_snapshot_kind_lookup() {
        let board = Board::from_layout(&["RO", "P."], 1).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.kind_at(Position::new(0, 1)), Some(CandyKind::Orange));
        assert_eq!(snap.kind_at(Position::new(1, 0)), Some(CandyKind::Purple));
        assert_eq!(snap.kind_at(Position::new(1, 1)), None);
        assert_eq!(snap.kind_at(Position::new(5, 5)), None);
        assert_eq!(snap.empty_cells(), 1);
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let mut snap = BoardSnapshot::default();
        Board::from_layout(&["RGB"], 1).unwrap().snapshot_into(&mut snap);
        Board::from_layout(&["R", "G"], 1).unwrap().snapshot_into(&mut snap);
        assert_eq!((snap.rows, snap.cols), (2, 1));
        assert_eq!(snap.cells.len(), 2);

        snap.clear();
        assert!(snap.cells.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = Board::from_layout(&["RG"], 1).unwrap().snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"rows":1,"cols":2,"cells":[[1,4]]}"#);
    }
}
