//! Game session module - owns the complete mutable state of one game
//!
//! This module ties together board, pieces, RNG, scoring and input debounce.
//! It handles gravity timing, piece movement, rotation, locking, line clears
//! and the Running / GameOver state machine.
//!
//! All operations run to completion on the caller's thread; there is exactly
//! one mutator. Observers read through [`GameSession::snapshot`] and
//! [`GameSession::take_events`].

use crate::board::{collides, Board};
use crate::input_gate::InputGate;
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::Progress;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current: Piece,
    next: Piece,
    generator: PieceGenerator,
    progress: Progress,
    phase: Phase,
    gate: InputGate,
    /// Session clock: total elapsed tick time
    clock_ms: u64,
    /// Time since the last downward move
    drop_timer_ms: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    pieces_locked: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let current = generator.draw();
        let next = generator.draw();
        Self::assemble(Board::new(), current, next, generator)
    }

    /// Create a game from an existing position (puzzles, replays, tests).
    ///
    /// The spawn check runs immediately, so a position whose current piece
    /// already collides starts in `GameOver`.
    pub fn from_parts(board: Board, current: Piece, next: Piece, seed: u32) -> Self {
        Self::assemble(board, current, next, PieceGenerator::new(seed))
    }

    fn assemble(board: Board, current: Piece, next: Piece, generator: PieceGenerator) -> Self {
        let phase = if collides(&current, &board, 0, 0) {
            Phase::GameOver
        } else {
            Phase::Running
        };
        Self {
            board,
            current,
            next,
            generator,
            progress: Progress::new(),
            phase,
            gate: InputGate::new(),
            clock_ms: 0,
            drop_timer_ms: 0,
            episode_id: 0,
            pieces_locked: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    /// Current gravity interval in milliseconds
    pub fn gravity_ms(&self) -> u32 {
        self.progress.gravity_ms
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.current;
        out.ghost_y = match self.phase {
            Phase::Running => Some(self.ghost().y),
            Phase::GameOver => None,
        };
        out.next = self.next;
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.gravity_ms = self.progress.gravity_ms;
        out.game_over = self.is_game_over();
        out.episode_id = self.episode_id;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to translate the current piece.
    ///
    /// A blocked downward move locks the piece. A blocked sideways move
    /// changes nothing. No-op after game over.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if self.is_game_over() {
            return MoveOutcome::Blocked;
        }

        if collides(&self.current, &self.board, dx, dy) {
            if dy > 0 {
                self.lock_with(0);
                return MoveOutcome::Locked;
            }
            return MoveOutcome::Blocked;
        }

        self.current = self.current.shifted(dx, dy);
        if dy > 0 {
            self.drop_timer_ms = 0;
        }
        if dx != 0 {
            self.events.push(GameEvent::Moved);
        }
        MoveOutcome::Moved
    }

    /// Rotate the current piece clockwise.
    ///
    /// When the rotated matrix collides in place, one column toward the board
    /// center is tried, then one column the other way. Only these two kicks
    /// exist. Returns false (and changes nothing) when all three placements
    /// collide.
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        let rotated = self.current.rotated();
        let placed = if !collides(&rotated, &self.board, 0, 0) {
            Some(rotated)
        } else {
            let toward_center: i8 = if rotated.x > (BOARD_WIDTH / 2) as i8 {
                -1
            } else {
                1
            };
            [toward_center, -toward_center]
                .into_iter()
                .find(|&kick| !collides(&rotated, &self.board, kick, 0))
                .map(|kick| rotated.shifted(kick, 0))
        };

        match placed {
            Some(piece) => {
                self.current = piece;
                self.events.push(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// Drop the current piece as far as it goes, score one point per row, and lock it.
    ///
    /// Returns the number of rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if self.is_game_over() {
            return 0;
        }

        let mut rows: u32 = 0;
        while !collides(&self.current, &self.board, 0, 1) {
            self.current = self.current.shifted(0, 1);
            rows += 1;
        }

        self.progress.add_drop_points(rows);
        self.lock_with(rows);
        rows
    }

    /// Commit the current piece to the board where it stands.
    pub fn lock(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.lock_with(0);
    }

    fn lock_with(&mut self, drop_distance: u32) {
        self.board.lock_piece(&self.current);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.events.push(GameEvent::Locked { drop_distance });

        let cleared = self.board.clear_full_rows().len() as u32;
        let result = self.progress.record_lock(cleared);
        if cleared > 0 {
            self.events.push(GameEvent::LinesCleared { count: cleared });
        }
        if let Some(level) = result.new_level {
            self.events.push(GameEvent::LevelUp { level });
        }

        self.current = self.next;
        self.next = self.generator.draw();
        self.drop_timer_ms = 0;

        // Spawn check happens once per lock
        if collides(&self.current, &self.board, 0, 0) {
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Where the current piece would land if hard-dropped now.
    ///
    /// Works on a copy; the live piece is untouched.
    pub fn ghost(&self) -> Piece {
        let mut ghost = self.current;
        while !collides(&ghost, &self.board, 0, 1) {
            ghost = ghost.shifted(0, 1);
        }
        ghost
    }

    /// Advance the session clock and apply gravity.
    ///
    /// At most one downward move per tick, once more than the gravity interval
    /// has passed since the last one. Returns true when gravity fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms as u64);
        if self.is_game_over() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.progress.gravity_ms {
            self.drop_timer_ms = 0;
            self.move_piece(0, 1);
            return true;
        }

        false
    }

    /// Apply an input intent immediately.
    ///
    /// Returns true when the intent passed debounce and changed the session.
    /// After game over only `Restart` is accepted; while running it is ignored.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if intent == Intent::Restart {
            if self.is_game_over() {
                self.reset();
                return true;
            }
            return false;
        }

        if self.is_game_over() || !self.gate.permit(intent, self.clock_ms) {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.move_piece(-1, 0) == MoveOutcome::Moved,
            Intent::MoveRight => self.move_piece(1, 0) == MoveOutcome::Moved,
            Intent::SoftDrop => self.move_piece(0, 1) != MoveOutcome::Blocked,
            Intent::Rotate => self.rotate(),
            Intent::HardDrop => {
                self.hard_drop();
                true
            }
            Intent::Restart => false,
        }
    }

    /// Replace the whole session with a fresh game.
    ///
    /// Board, counters, gravity, pieces and debounce state are all reinitialized;
    /// only the episode id carries over (incremented).
    pub fn reset(&mut self) {
        let seed = self.generator.seed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(seed);
        self.episode_id = next_episode;
        self.events.push(GameEvent::Reset);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
