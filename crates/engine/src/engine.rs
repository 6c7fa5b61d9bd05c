//! Puzzle engine - the turn state machine
//!
//! Selection, swap validation, match removal, scoring, gravity, cascades and
//! terminal checks for one level. Every visual phase ends in a settle request;
//! the engine is turn-locked until that request's ticket comes back through
//! [`GameEngine::complete_settle`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crush_core::matcher::{self, Match};
use crush_core::{calculate_score, Board, BoardConfig, BoardError, BoardSnapshot, Level};
use crush_types::{GamePhase, Position, BASE_COMBO_MULTIPLIER};

use crate::listener::{GameListener, NullListener};
use crate::settle::{FallingToken, SettleKind, SettleRequest, SettleTicket, SwapMotion};

/// Serializable view of an engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub level: u32,
    pub phase: String,
    pub score: u32,
    pub target_score: u32,
    pub moves_remaining: u32,
    pub combo_multiplier: u32,
    pub stars: u8,
    /// `[row, col]` of the selected candy.
    pub selected: Option<[usize; 2]>,
    pub board: BoardSnapshot,
}

/// One level's game session
#[derive(Debug)]
pub struct GameEngine<L: GameListener = NullListener> {
    level: Level,
    board: Board,
    listener: L,
    phase: GamePhase,
    score: u32,
    moves_remaining: u32,
    selected: Option<Position>,
    /// The player's swap while it is being validated or reverted.
    pending_swap: Option<(Position, Position)>,
    pending_matches: Vec<Match>,
    combo: u32,
    pending: Option<SettleRequest>,
    next_ticket: u64,
    torn_down: bool,
}

impl<L: GameListener> GameEngine<L> {
    /// Start a level on a freshly generated board
    pub fn new(level: Level, config: &BoardConfig, listener: L) -> Result<Self, BoardError> {
        let board = Board::new(config)?;
        Ok(Self::with_board(level, board, listener))
    }

    /// Start a level on a prepared board
    pub fn with_board(level: Level, board: Board, listener: L) -> Self {
        debug!(
            level = level.number,
            target = level.target_score,
            moves = level.max_moves,
            "engine started"
        );
        Self {
            level,
            board,
            listener,
            phase: GamePhase::Idle,
            score: 0,
            moves_remaining: level.max_moves,
            selected: None,
            pending_swap: None,
            pending_matches: Vec::new(),
            combo: BASE_COMBO_MULTIPLIER,
            pending: None,
            next_ticket: 1,
            torn_down: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// True when a selection would be accepted
    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Idle && self.pending.is_none() && !self.torn_down
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn target_score(&self) -> u32 {
        self.level.target_score
    }

    pub fn level_number(&self) -> u32 {
        self.level.number
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripting refills
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Stars earned by the current score
    pub fn stars(&self) -> u8 {
        self.level.stars_for(self.score)
    }

    /// The request the engine is waiting on, if any
    pub fn pending_settle(&self) -> Option<&SettleRequest> {
        self.pending.as_ref()
    }

    /// First legal swap in scan order, only while idle
    pub fn hint(&self) -> Option<(Position, Position)> {
        if !self.is_idle() {
            return None;
        }
        self.board.find_hint()
    }

    /// Player taps a cell
    ///
    /// Returns whether the selection was accepted. Selections are rejected
    /// outside `Idle`, while a settle is outstanding, after teardown, and on
    /// empty or out-of-range cells.
    pub fn select(&mut self, pos: Position) -> bool {
        if !self.is_idle() {
            return false;
        }
        if self.board.get(pos).flatten().is_none() {
            return false;
        }

        match self.selected {
            None => self.selected = Some(pos),
            Some(prev) if prev == pos => self.selected = None,
            Some(prev) if prev.is_adjacent(pos) => {
                self.selected = None;
                self.begin_swap(prev, pos);
            }
            Some(_) => self.selected = Some(pos),
        }
        true
    }

    /// Resume after the animation collaborator finished `ticket`
    ///
    /// Returns false for stale or unknown tickets and after teardown; the
    /// engine state is untouched in that case.
    pub fn complete_settle(&mut self, ticket: SettleTicket) -> bool {
        if self.torn_down {
            debug!(ticket = ticket.id(), "settle ignored after teardown");
            return false;
        }
        match &self.pending {
            Some(req) if req.ticket == ticket => {}
            _ => {
                warn!(ticket = ticket.id(), "rejected stale settle ticket");
                return false;
            }
        }
        self.pending = None;

        match self.phase {
            GamePhase::SwappingValid => self.finish_swap(),
            GamePhase::SwappingInvalid => self.finish_revert(),
            GamePhase::Resolving => self.finish_clear(),
            GamePhase::Falling => self.finish_fall(),
            _ => {}
        }
        true
    }

    /// Complete settles until none is outstanding
    ///
    /// Returns the number of settles completed.
    pub fn settle_all(&mut self) -> usize {
        let mut completed = 0;
        while let Some(ticket) = self.pending.as_ref().map(|req| req.ticket) {
            if !self.complete_settle(ticket) {
                break;
            }
            completed += 1;
        }
        completed
    }

    /// Abandon the session
    ///
    /// The outstanding settle, if any, is dropped without rolling back; later
    /// completions and selections are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        debug!(phase = self.phase.as_str(), "engine torn down");
        self.torn_down = true;
        self.pending = None;
        self.selected = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            level: self.level.number,
            phase: self.phase.as_str().to_string(),
            score: self.score,
            target_score: self.level.target_score,
            moves_remaining: self.moves_remaining,
            combo_multiplier: self.combo,
            stars: self.stars(),
            selected: self.selected.map(|p| [p.row, p.col]),
            board: self.board.snapshot(),
        }
    }

    fn begin_swap(&mut self, a: Position, b: Position) {
        self.board.swap(a, b);
        self.pending_swap = Some((a, b));
        self.set_phase(GamePhase::SwappingValid);
        let motions = self.swap_motions(a, b);
        self.request(SettleKind::Swap(motions));
    }

    fn finish_swap(&mut self) {
        let matches = matcher::find_all_matches(&self.board);

        if matches.is_empty() {
            if let Some((a, b)) = self.pending_swap {
                self.board.swap(a, b);
                self.set_phase(GamePhase::SwappingInvalid);
                let motions = self.swap_motions(b, a);
                self.request(SettleKind::InvalidSwap(motions));
            } else {
                self.set_phase(GamePhase::Idle);
            }
            return;
        }

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.listener.on_moves_changed(self.moves_remaining);
        self.combo = BASE_COMBO_MULTIPLIER;
        self.begin_clear(matches);
    }

    fn finish_revert(&mut self) {
        self.pending_swap = None;
        self.set_phase(GamePhase::Idle);
    }

    fn begin_clear(&mut self, matches: Vec<Match>) {
        let mut positions: Vec<Position> = matches
            .iter()
            .flat_map(|m| m.positions().iter().copied())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        let tokens = positions
            .into_iter()
            .filter_map(|pos| self.board.token(pos))
            .map(|mut token| {
                token.candy.matched = true;
                token
            })
            .collect();

        self.pending_matches = matches;
        self.set_phase(GamePhase::Resolving);
        self.request(SettleKind::MatchClear(tokens));
    }

    fn finish_clear(&mut self) {
        let matches = std::mem::take(&mut self.pending_matches);
        let base = self.board.remove_matches(&matches);
        let cleared = self.board.take_cleared();
        let step = calculate_score(base, self.combo);
        self.score = self.score.saturating_add(step.total);

        debug!(
            matches = matches.len(),
            cleared = cleared.len(),
            base = step.base,
            multiplier = step.multiplier,
            "matches removed"
        );
        self.listener.on_score_changed(self.score, step.total);

        self.set_phase(GamePhase::Falling);
        let moved = self
            .board
            .apply_gravity()
            .into_iter()
            .filter_map(|m| {
                self.board.token(m.to).map(|token| FallingToken {
                    token,
                    distance: m.distance(),
                })
            })
            .collect();
        let spawned = self
            .board
            .fill_empty_spaces()
            .into_iter()
            .filter_map(|pos| {
                self.board.token(pos).map(|token| FallingToken {
                    token,
                    distance: pos.row + 1,
                })
            })
            .collect();
        self.request(SettleKind::Fall { moved, spawned });
    }

    fn finish_fall(&mut self) {
        self.board.settle_new_flags();
        self.combo = self.combo.saturating_add(1);

        let matches = matcher::find_all_matches(&self.board);
        if matches.is_empty() {
            self.pending_swap = None;
            self.check_terminal();
        } else {
            debug!(combo = self.combo, "cascade");
            self.begin_clear(matches);
        }
    }

    fn check_terminal(&mut self) {
        if self.score >= self.level.target_score {
            let stars = self.stars();
            self.set_phase(GamePhase::LevelComplete);
            info!(level = self.level.number, score = self.score, stars, "level complete");
            self.listener.on_level_complete(stars);
        } else if self.moves_remaining == 0 {
            self.set_phase(GamePhase::GameOver);
            info!(level = self.level.number, score = self.score, "game over");
            self.listener.on_game_over();
        } else if !self.board.has_valid_moves() {
            self.set_phase(GamePhase::NoMoves);
            info!(level = self.level.number, score = self.score, "no moves left");
            self.listener.on_no_moves();
        } else {
            self.set_phase(GamePhase::Idle);
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        debug!(from = self.phase.as_str(), to = phase.as_str(), "phase");
        self.phase = phase;
        self.listener.on_state_changed(phase);
    }

    fn request(&mut self, kind: SettleKind) {
        let ticket = SettleTicket(self.next_ticket);
        self.next_ticket += 1;
        let request = SettleRequest { ticket, kind };
        self.listener.on_settle_requested(&request);
        self.pending = Some(request);
    }

    /// Motions for a swap already applied: the candy now at `to` came from `from`
    fn swap_motions(&self, from: Position, to: Position) -> Vec<SwapMotion> {
        [(from, to), (to, from)]
            .into_iter()
            .filter_map(|(src, dst)| {
                self.board.get(dst).flatten().map(|candy| SwapMotion {
                    from: src,
                    to: dst,
                    candy,
                })
            })
            .collect()
    }
}

impl GameEngine<NullListener> {
    /// Engine without a listener
    pub fn headless(level: Level, config: &BoardConfig) -> Result<Self, BoardError> {
        Self::new(level, config, NullListener)
    }
}
