//! Settle requests: the suspension points between a logical transition and
//! its visual completion.
//!
//! The engine publishes one [`SettleRequest`] at a time and stops accepting
//! input until the caller hands its ticket back through
//! [`GameEngine::complete_settle`](crate::GameEngine::complete_settle).

use crush_types::{Candy, Position, Token};

/// Identifies one outstanding settle; never reused within an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettleTicket(pub(crate) u64);

impl SettleTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A candy sliding between two neighbouring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMotion {
    pub from: Position,
    pub to: Position,
    pub candy: Candy,
}

/// A candy dropping `distance` rows into `token.position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingToken {
    pub token: Token,
    pub distance: usize,
}

/// What the animation collaborator is asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleKind {
    /// The player's swap, already applied to the board.
    Swap(Vec<SwapMotion>),
    /// A swap that formed nothing, already reverted on the board.
    InvalidSwap(Vec<SwapMotion>),
    /// Candies about to be cleared, flagged `matched`.
    MatchClear(Vec<Token>),
    /// Gravity and refill, already applied. Spawned candies fall from above
    /// the board (`row + 1` rows).
    Fall {
        moved: Vec<FallingToken>,
        spawned: Vec<FallingToken>,
    },
}

impl SettleKind {
    pub fn name(&self) -> &'static str {
        match self {
            SettleKind::Swap(_) => "swap",
            SettleKind::InvalidSwap(_) => "invalidSwap",
            SettleKind::MatchClear(_) => "matchClear",
            SettleKind::Fall { .. } => "fall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleRequest {
    pub ticket: SettleTicket,
    pub kind: SettleKind,
}

impl SettleRequest {
    /// Every candy the request animates, at its destination cell
    pub fn tokens(&self) -> Vec<Token> {
        match &self.kind {
            SettleKind::Swap(motions) | SettleKind::InvalidSwap(motions) => motions
                .iter()
                .map(|m| Token {
                    position: m.to,
                    candy: m.candy,
                })
                .collect(),
            SettleKind::MatchClear(tokens) => tokens.clone(),
            SettleKind::Fall { moved, spawned } => {
                moved.iter().chain(spawned).map(|f| f.token).collect()
            }
        }
    }
}
