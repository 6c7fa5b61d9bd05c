//! Per-level unlock, best score and stars.

use serde::Serialize;
use tracing::{debug, info, warn};

use crush_core::{Level, LevelCatalog};

use crate::backend::{
    score_key, stars_key, unlocked_key, MemoryBackend, ProgressBackend, ProgressValue,
};
use crate::error::StoreError;

/// Progress on one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level_number: u32,
    pub is_unlocked: bool,
    pub best_score: u32,
    pub stars: u8,
}

impl LevelProgress {
    pub fn is_completed(&self) -> bool {
        self.stars > 0
    }
}

/// Outcome of [`ProgressStore::complete_level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelCompletion {
    pub completed: bool,
    pub stars: u8,
    pub unlocked_new_level: bool,
    pub is_new_high_score: bool,
}

/// Level progress over a persistence backend
///
/// State is read from the backend when the store is built (or on
/// [`reload`](Self::reload)); every mutation is written through before the
/// call returns.
#[derive(Debug)]
pub struct ProgressStore<B: ProgressBackend = MemoryBackend> {
    catalog: LevelCatalog,
    backend: B,
    progress: Vec<LevelProgress>,
}

impl<B: ProgressBackend> ProgressStore<B> {
    pub fn new(catalog: LevelCatalog, backend: B) -> Self {
        let mut store = Self {
            catalog,
            backend,
            progress: Vec::new(),
        };
        store.reload();
        store
    }

    /// Store over the standard 25 levels
    pub fn with_standard_levels(backend: B) -> Self {
        Self::new(LevelCatalog::standard(), backend)
    }

    /// Re-read every level's record from the backend
    ///
    /// Missing keys read as locked with no score, except level 1, which is
    /// always unlocked.
    pub fn reload(&mut self) {
        let backend = &self.backend;
        self.progress = self
            .catalog
            .iter()
            .map(|level| {
                let n = level.number;
                let is_unlocked = n == 1 || backend.get_bool(&unlocked_key(n)).unwrap_or(false);
                let best_score = backend
                    .get_int(&score_key(n))
                    .and_then(|v| u32::try_from(v).ok())
                    .unwrap_or(0);
                let stars = backend
                    .get_int(&stars_key(n))
                    .and_then(|v| u8::try_from(v.clamp(0, 3)).ok())
                    .unwrap_or(0);
                LevelProgress {
                    level_number: n,
                    is_unlocked,
                    best_score,
                    stars,
                }
            })
            .collect();
        debug!(levels = self.progress.len(), "progress loaded");
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn level(&self, number: u32) -> Option<&Level> {
        self.catalog.get(number)
    }

    pub fn progress_for(&self, number: u32) -> Option<&LevelProgress> {
        let idx = (number as usize).checked_sub(1)?;
        self.progress.get(idx)
    }

    pub fn all_progress(&self) -> &[LevelProgress] {
        &self.progress
    }

    pub fn total_levels(&self) -> usize {
        self.catalog.len()
    }

    /// Record a finished attempt at `level_number`
    ///
    /// Best score and stars only ever go up. Earning at least one star
    /// unlocks the next level if it is still locked. All changes are written
    /// through as one backend commit; if it fails, neither the backend nor
    /// the in-memory progress changes. Unknown levels yield an all-false
    /// result.
    pub fn complete_level(
        &mut self,
        level_number: u32,
        score: u32,
    ) -> Result<LevelCompletion, StoreError> {
        let Some(level) = self.catalog.get(level_number).copied() else {
            warn!(level = level_number, "completion for unknown level");
            return Ok(LevelCompletion::default());
        };
        let idx = level_number as usize - 1;

        let stars = level.stars_for(score);
        let current = self.progress[idx];
        let is_new_high_score = score > current.best_score;
        let improves_stars = stars > current.stars;
        let unlocks_next = stars > 0
            && self
                .progress
                .get(idx + 1)
                .is_some_and(|next| !next.is_unlocked);

        let mut updates = Vec::with_capacity(3);
        if is_new_high_score {
            updates.push((score_key(level_number), ProgressValue::Int(i64::from(score))));
        }
        if improves_stars {
            updates.push((stars_key(level_number), ProgressValue::Int(i64::from(stars))));
        }
        if unlocks_next {
            updates.push((unlocked_key(level_number + 1), ProgressValue::Bool(true)));
        }

        if !updates.is_empty() {
            self.backend.put_many(&updates)?;
        }

        if is_new_high_score {
            self.progress[idx].best_score = score;
        }
        if improves_stars {
            self.progress[idx].stars = stars;
        }
        if unlocks_next {
            self.progress[idx + 1].is_unlocked = true;
            info!(level = level_number + 1, "level unlocked");
        }

        info!(
            level = level_number,
            score,
            stars,
            new_high_score = is_new_high_score,
            "level result recorded"
        );

        Ok(LevelCompletion {
            completed: stars > 0,
            stars,
            unlocked_new_level: unlocks_next,
            is_new_high_score,
        })
    }

    /// Clear all persisted progress and reload defaults
    pub fn reset_progress(&mut self) -> Result<(), StoreError> {
        self.backend.clear()?;
        self.reload();
        info!("progress reset");
        Ok(())
    }

    pub fn total_stars(&self) -> u32 {
        self.progress.iter().map(|p| u32::from(p.stars)).sum()
    }

    pub fn max_possible_stars(&self) -> u32 {
        self.catalog.max_stars()
    }

    pub fn completed_count(&self) -> usize {
        self.progress.iter().filter(|p| p.is_completed()).count()
    }

    pub fn unlocked_count(&self) -> usize {
        self.progress.iter().filter(|p| p.is_unlocked).count()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
