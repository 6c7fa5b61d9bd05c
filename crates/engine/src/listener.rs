//! Listener contract: how the engine reports transitions to its collaborator.

use crush_types::GamePhase;

use crate::settle::{SettleRequest, SettleTicket};

/// Receives engine notifications synchronously, at the point of transition
///
/// Every method has a no-op default, so collaborators implement only what
/// they render.
pub trait GameListener {
    fn on_score_changed(&mut self, _total: u32, _delta: u32) {}
    fn on_moves_changed(&mut self, _remaining: u32) {}
    fn on_level_complete(&mut self, _stars: u8) {}
    fn on_game_over(&mut self) {}
    fn on_no_moves(&mut self) {}
    fn on_state_changed(&mut self, _phase: GamePhase) {}
    fn on_settle_requested(&mut self, _request: &SettleRequest) {}
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl GameListener for NullListener {}

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { total: u32, delta: u32 },
    MovesChanged { remaining: u32 },
    LevelComplete { stars: u8 },
    GameOver,
    NoMoves,
    StateChanged(GamePhase),
    SettleRequested { ticket: SettleTicket, kind: &'static str },
}

/// Listener that keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<GameEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the recorder empty
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deltas of every score notification, in order
    pub fn score_deltas(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged { delta, .. } => Some(*delta),
                _ => None,
            })
            .collect()
    }

    /// Phases entered, in order
    pub fn phases(&self) -> Vec<GamePhase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StateChanged(phase) => Some(*phase),
                _ => None,
            })
            .collect()
    }
}

impl GameListener for EventRecorder {
    fn on_score_changed(&mut self, total: u32, delta: u32) {
        self.events.push(GameEvent::ScoreChanged { total, delta });
    }

    fn on_moves_changed(&mut self, remaining: u32) {
        self.events.push(GameEvent::MovesChanged { remaining });
    }

    fn on_level_complete(&mut self, stars: u8) {
        self.events.push(GameEvent::LevelComplete { stars });
    }

    fn on_game_over(&mut self) {
        self.events.push(GameEvent::GameOver);
    }

    fn on_no_moves(&mut self) {
        self.events.push(GameEvent::NoMoves);
    }

    fn on_state_changed(&mut self, phase: GamePhase) {
        self.events.push(GameEvent::StateChanged(phase));
    }

    fn on_settle_requested(&mut self, request: &SettleRequest) {
        self.events.push(GameEvent::SettleRequested {
            ticket: request.ticket,
            kind: request.kind.name(),
        });
    }
}
