//! Error types for board construction and level catalogs.

/// Errors that can occur while building a board.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("palette must have between 3 and 6 candy kinds, got {0}")]
    InvalidPalette(usize),

    #[error("no playable board after {attempts} generation attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("invalid layout at row {row}: {reason}")]
    Layout { row: usize, reason: String },
}

/// Errors that can occur when validating a level catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("level catalog is empty")]
    Empty,

    #[error("levels must be numbered contiguously from 1 (expected {expected}, found {found})")]
    NonContiguous { expected: u32, found: u32 },

    #[error("level {level}: star thresholds must be strictly increasing")]
    ThresholdOrder { level: u32 },

    #[error("level {level}: difficulty must not decrease")]
    Difficulty { level: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::GenerationExhausted { attempts: 100 };
        assert_eq!(
            err.to_string(),
            "no playable board after 100 generation attempts"
        );
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NonContiguous {
            expected: 2,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "levels must be numbered contiguously from 1 (expected 2, found 4)"
        );
    }
}
