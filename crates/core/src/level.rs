//! Level definitions and the standard 25-level catalog.

use crate::error::CatalogError;

/// Scores needed for one, two and three stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarThresholds {
    pub one: u32,
    pub two: u32,
    pub three: u32,
}

/// Immutable level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    pub number: u32,
    /// Score that completes the level.
    pub target_score: u32,
    pub max_moves: u32,
    pub stars: StarThresholds,
}

impl Level {
    pub const fn new(
        number: u32,
        target_score: u32,
        max_moves: u32,
        one: u32,
        two: u32,
        three: u32,
    ) -> Self {
        Self {
            number,
            target_score,
            max_moves,
            stars: StarThresholds { one, two, three },
        }
    }

    /// Stars earned by `score` (0..=3)
    ///
    /// # Examples
    ///
    /// ```
    /// use crush_core::level::Level;
    ///
    /// let level = Level::new(1, 500, 30, 500, 800, 1200);
    /// assert_eq!(level.stars_for(499), 0);
    /// assert_eq!(level.stars_for(850), 2);
    /// assert_eq!(level.stars_for(1200), 3);
    /// ```
    pub fn stars_for(&self, score: u32) -> u8 {
        if score >= self.stars.three {
            3
        } else if score >= self.stars.two {
            2
        } else if score >= self.stars.one {
            1
        } else {
            0
        }
    }
}

/// Levels 1-25: targets rise and move allowances shrink.
pub const STANDARD_LEVELS: [Level; 25] = [
    Level::new(1, 500, 30, 500, 800, 1200),
    Level::new(2, 600, 28, 600, 1000, 1500),
    Level::new(3, 750, 28, 750, 1200, 1800),
    Level::new(4, 900, 26, 900, 1400, 2100),
    Level::new(5, 1000, 26, 1000, 1600, 2400),
    Level::new(6, 1200, 25, 1200, 1900, 2800),
    Level::new(7, 1400, 25, 1400, 2200, 3200),
    Level::new(8, 1600, 24, 1600, 2500, 3600),
    Level::new(9, 1800, 24, 1800, 2800, 4000),
    Level::new(10, 2000, 23, 2000, 3100, 4500),
    Level::new(11, 2300, 23, 2300, 3500, 5000),
    Level::new(12, 2600, 22, 2600, 3900, 5500),
    Level::new(13, 3000, 22, 3000, 4400, 6200),
    Level::new(14, 3400, 21, 3400, 5000, 7000),
    Level::new(15, 3800, 21, 3800, 5600, 7800),
    Level::new(16, 4200, 20, 4200, 6200, 8600),
    Level::new(17, 4700, 20, 4700, 6900, 9500),
    Level::new(18, 5200, 19, 5200, 7600, 10400),
    Level::new(19, 5800, 19, 5800, 8400, 11500),
    Level::new(20, 6500, 18, 6500, 9500, 13000),
    Level::new(21, 7200, 18, 7200, 10500, 14500),
    Level::new(22, 8000, 17, 8000, 11600, 16000),
    Level::new(23, 9000, 17, 9000, 13000, 18000),
    Level::new(24, 10000, 16, 10000, 14500, 20000),
    Level::new(25, 12000, 15, 12000, 17000, 24000),
];

/// Ordered, validated list of levels numbered from 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Validate and wrap a level list
    ///
    /// Levels must be numbered 1, 2, 3, ... in order, each with strictly
    /// increasing star thresholds. Each level's target must exceed the one
    /// before it, and its move allowance must not be larger.
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut prev: Option<&Level> = None;
        for (i, level) in levels.iter().enumerate() {
            let expected = i as u32 + 1;
            if level.number != expected {
                return Err(CatalogError::NonContiguous {
                    expected,
                    found: level.number,
                });
            }

            let s = level.stars;
            if !(s.one < s.two && s.two < s.three) {
                return Err(CatalogError::ThresholdOrder {
                    level: level.number,
                });
            }

            if let Some(p) = prev {
                if level.target_score <= p.target_score || level.max_moves > p.max_moves {
                    return Err(CatalogError::Difficulty {
                        level: level.number,
                    });
                }
            }
            prev = Some(level);
        }

        Ok(Self { levels })
    }

    /// The built-in 25 levels
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    /// Level by number, None if out of range
    pub fn get(&self, number: u32) -> Option<&Level> {
        let idx = (number as usize).checked_sub(1)?;
        self.levels.get(idx)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    /// The level after `number`, None for the last level
    pub fn next_after(&self, number: u32) -> Option<&Level> {
        self.get(number.checked_add(1)?)
    }

    /// Three stars per level
    pub fn max_stars(&self) -> u32 {
        self.levels.len() as u32 * 3
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = LevelCatalog::new(STANDARD_LEVELS.to_vec()).unwrap();
        assert_eq!(catalog, LevelCatalog::standard());
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.max_stars(), 75);
    }

    #[test]
    fn test_first_and_last_levels() {
        let catalog = LevelCatalog::standard();
        let first = catalog.get(1).unwrap();
        assert_eq!((first.target_score, first.max_moves), (500, 30));

        let last = catalog.get(25).unwrap();
        assert_eq!((last.target_score, last.max_moves), (12000, 15));
        assert_eq!(last.stars.three, 24000);
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = LevelCatalog::standard();
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(26).is_none());
    }

    #[test]
    fn test_next_after() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.next_after(1).map(|l| l.number), Some(2));
        assert!(catalog.next_after(25).is_none());
        assert!(catalog.next_after(u32::MAX).is_none());
    }

    #[test]
    fn test_stars_for_boundaries() {
        let level = STANDARD_LEVELS[0];
        assert_eq!(level.stars_for(0), 0);
        assert_eq!(level.stars_for(500), 1);
        assert_eq!(level.stars_for(799), 1);
        assert_eq!(level.stars_for(800), 2);
        assert_eq!(level.stars_for(5000), 3);
    }

    #[test]
    fn test_catalog_rejects_gaps() {
        let levels = vec![STANDARD_LEVELS[0], STANDARD_LEVELS[2]];
        assert_eq!(
            LevelCatalog::new(levels).unwrap_err(),
            CatalogError::NonContiguous {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_catalog_rejects_bad_thresholds() {
        let levels = vec![Level::new(1, 100, 10, 100, 100, 200)];
        assert_eq!(
            LevelCatalog::new(levels).unwrap_err(),
            CatalogError::ThresholdOrder { level: 1 }
        );
    }

    #[test]
    fn test_catalog_rejects_easier_followup() {
        let levels = vec![
            Level::new(1, 500, 20, 500, 800, 1200),
            Level::new(2, 400, 20, 400, 800, 1200),
        ];
        assert_eq!(
            LevelCatalog::new(levels).unwrap_err(),
            CatalogError::Difficulty { level: 2 }
        );
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(LevelCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }
}
