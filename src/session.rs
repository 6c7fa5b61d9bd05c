//! Headless sessions: an engine played with instant settles.

use tracing::debug;

use crate::core::{BoardConfig, BoardError, Level};
use crate::engine::{EventRecorder, GameEngine, GameEvent};
use crate::progress::{LevelCompletion, ProgressBackend, ProgressStore, StoreError};
use crate::types::{GamePhase, Position, HINT_IDLE_MS};

/// One level played without an animation layer
#[derive(Debug)]
pub struct Session {
    engine: GameEngine<EventRecorder>,
    turns: u32,
}

impl Session {
    pub fn new(level: Level, config: &BoardConfig) -> Result<Self, BoardError> {
        let engine = GameEngine::new(level, config, EventRecorder::new())?;
        Ok(Self::from_engine(engine))
    }

    pub fn from_engine(engine: GameEngine<EventRecorder>) -> Self {
        Self { engine, turns: 0 }
    }

    pub fn engine(&self) -> &GameEngine<EventRecorder> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<EventRecorder> {
        &mut self.engine
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    /// Swaps attempted so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn events(&self) -> &[GameEvent] {
        self.engine.listener().events()
    }

    /// The hint a presentation layer shows after the player idles long enough
    pub fn hint_after(&self, idle_ms: u32) -> Option<(Position, Position)> {
        if idle_ms < HINT_IDLE_MS {
            return None;
        }
        self.engine.hint()
    }

    /// Tap `a` then `b` and settle everything the swap triggers
    pub fn play_swap(&mut self, a: Position, b: Position) -> bool {
        if !self.engine.is_idle() || !a.is_adjacent(b) {
            return false;
        }
        // Tapping a pending selection again clears it.
        if let Some(prev) = self.engine.selected() {
            self.engine.select(prev);
        }
        if !self.engine.select(a) || !self.engine.select(b) {
            return false;
        }
        self.turns += 1;
        self.engine.settle_all();
        true
    }

    /// Play the engine's own hint; false if there is nothing to play
    pub fn play_hint_turn(&mut self) -> bool {
        match self.engine.hint() {
            Some((a, b)) => self.play_swap(a, b),
            None => false,
        }
    }

    /// Play hints until the level ends or `max_turns` swaps were made
    pub fn play_until_done(&mut self, max_turns: u32) -> GamePhase {
        while self.turns < max_turns && self.play_hint_turn() {}
        debug!(
            turns = self.turns,
            score = self.engine.score(),
            phase = self.engine.phase().as_str(),
            "session stopped"
        );
        self.engine.phase()
    }

    /// Record a completed level in `store`
    ///
    /// Only a `LevelComplete` outcome is reported; anything else returns
    /// `Ok(None)` and leaves the store untouched.
    pub fn report<B: ProgressBackend>(
        &self,
        store: &mut ProgressStore<B>,
    ) -> Result<Option<LevelCompletion>, StoreError> {
        if self.engine.phase() != GamePhase::LevelComplete {
            return Ok(None);
        }
        store
            .complete_level(self.engine.level_number(), self.engine.score())
            .map(Some)
    }
}
