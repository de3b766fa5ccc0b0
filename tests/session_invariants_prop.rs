//! Property tests for the game session.
//!
//! Invariants covered:
//! - The active piece never overlaps a locked cell or leaves the side walls.
//! - Score, lines and level never decrease within an episode.
//! - Level only moves one step per lock, and gravity follows the level.
//! - The piece promoted on lock is the previous `next` piece.
//! - After game over the spawned piece collides with the board.
//! - Four clockwise rotations return every shape to its start.
//! - The collision oracle agrees with a cell-by-cell check.

use proptest::prelude::*;

use arcade_tetris::core::{collides, get_shape, Board, GameSession, Piece};
use arcade_tetris::types::{
    Color, Intent, PieceKind, BASE_GRAVITY_MS, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MIN_MS,
    GRAVITY_STEP_MS,
};

const INTENTS: [Intent; 5] = [
    Intent::MoveLeft,
    Intent::MoveRight,
    Intent::SoftDrop,
    Intent::Rotate,
    Intent::HardDrop,
];

fn expected_gravity(level: u32) -> u32 {
    BASE_GRAVITY_MS
        .saturating_sub((level - 1) * GRAVITY_STEP_MS)
        .max(GRAVITY_MIN_MS)
}

proptest! {
    #[test]
    fn generated_play_respects_session_invariants(
        seed in any::<u32>(),
        script in prop::collection::vec((0usize..INTENTS.len(), 0u32..400), 1..300),
    ) {
        let mut session = GameSession::new(seed);

        for (idx, elapsed) in script {
            let before = *session.progress();
            let locked_before = session.pieces_locked();
            let next_before = *session.next();

            session.apply_intent(INTENTS[idx]);
            session.tick(elapsed);

            let after = *session.progress();
            prop_assert!(after.score >= before.score);
            prop_assert!(after.lines >= before.lines);
            prop_assert!(after.level >= before.level);
            prop_assert!(after.level - before.level <= session.pieces_locked() - locked_before);
            prop_assert_eq!(after.gravity_ms, expected_gravity(after.level));

            if session.pieces_locked() == locked_before + 1 {
                prop_assert_eq!(session.current().kind, next_before.kind);
                prop_assert_eq!(session.current().color, next_before.color);
            }

            if session.is_game_over() {
                prop_assert!(collides(session.current(), session.board(), 0, 0));
                break;
            }

            for (x, y) in session.current().cells() {
                prop_assert!((0..BOARD_WIDTH as i8).contains(&x));
                prop_assert!(y < BOARD_HEIGHT as i8);
                prop_assert!(!session.board().is_occupied(x, y));
            }
        }
    }

    #[test]
    fn rotations_form_a_cycle_of_four(
        kind_idx in 0usize..PieceKind::ALL.len(),
        turns in 0usize..12,
    ) {
        let start = get_shape(PieceKind::ALL[kind_idx]);
        let mut m = start;
        for _ in 0..turns {
            m = m.rotate_cw();
        }

        prop_assert_eq!(m.filled_count(), 4);
        if turns % 2 == 1 {
            prop_assert_eq!((m.width(), m.height()), (start.height(), start.width()));
        } else {
            prop_assert_eq!((m.width(), m.height()), (start.width(), start.height()));
        }
        for _ in 0..(4 - turns % 4) % 4 {
            m = m.rotate_cw();
        }
        prop_assert_eq!(m, start);
    }

    #[test]
    fn collides_matches_cell_check(
        cells in prop::collection::vec((0i8..BOARD_WIDTH as i8, 0i8..BOARD_HEIGHT as i8), 0..60),
        kind_idx in 0usize..PieceKind::ALL.len(),
        rotations in 0usize..4,
        x in -3i8..12,
        y in -4i8..22,
    ) {
        let mut board = Board::new();
        for (cx, cy) in cells {
            board.set(cx, cy, Color::new(1));
        }

        let mut piece = Piece::new(PieceKind::ALL[kind_idx], Color::MIN);
        for _ in 0..rotations {
            piece = piece.rotated();
        }
        piece.x = x;
        piece.y = y;

        let expected = piece.cells().any(|(px, py)| {
            px < 0
                || px >= BOARD_WIDTH as i8
                || py >= BOARD_HEIGHT as i8
                || (py >= 0 && board.is_occupied(px, py))
        });
        prop_assert_eq!(collides(&piece, &board, 0, 0), expected);
    }
}
