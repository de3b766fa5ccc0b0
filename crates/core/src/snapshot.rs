use crate::pieces::Piece;
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

/// Read-only view of a session for renderers and observers.
///
/// `board` holds color indices, 0 for empty. Locked cells only; the active
/// piece is drawn from `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Piece,
    /// Landing row of the active piece; `None` after game over
    pub ghost_y: Option<i8>,
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_ms: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub pieces_locked: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: Piece::new(PieceKind::I, Color::MIN),
            ghost_y: None,
            next: Piece::new(PieceKind::I, Color::MIN),
            score: 0,
            level: START_LEVEL,
            lines: 0,
            gravity_ms: 0,
            game_over: false,
            episode_id: 0,
            pieces_locked: 0,
        }
    }
}
