//! Integration tests for the game session: drops, clears, levels, debounce and restart

use arcade_tetris::core::{Board, GameSession, Piece};
use arcade_tetris::types::{
    Color, GameEvent, Intent, MoveOutcome, Phase, PieceKind, BASE_GRAVITY_MS, BOARD_WIDTH,
    GRAVITY_STEP_MS,
};

fn piece(kind: PieceKind, color: u8) -> Piece {
    Piece::new(kind, Color::new(color).unwrap())
}

fn session_with(board: Board, current: PieceKind, next: PieceKind) -> GameSession {
    GameSession::from_parts(board, piece(current, 2), piece(next, 5), 12345)
}

fn fill_row_except(board: &mut Board, y: i8, skip: std::ops::Range<i8>) {
    for x in 0..BOARD_WIDTH as i8 {
        if !skip.contains(&x) {
            board.set(x, y, Color::new(1));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let session = GameSession::new(12345);
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.gravity_ms(), BASE_GRAVITY_MS);
    assert_eq!(session.board().filled_count(), 0);
}

#[test]
fn test_hard_drop_i_on_empty_board() {
    let mut session = session_with(Board::new(), PieceKind::I, PieceKind::O);

    assert_eq!(session.hard_drop(), 19);
    assert_eq!(session.score(), 19);
    for x in 4..8 {
        assert!(session.board().is_occupied(x, 19));
    }
    assert_eq!(session.current().kind, PieceKind::O);
    assert_eq!(session.pieces_locked(), 1);
    assert_eq!(
        session.take_events(),
        vec![GameEvent::Locked { drop_distance: 19 }]
    );

    let snap = session.snapshot();
    assert_eq!(snap.board[19][4], 2);
    assert_eq!(snap.active.kind, PieceKind::O);
    assert_eq!(snap.ghost_y, Some(17));
}

#[test]
fn test_hard_drop_completes_a_line() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, 4..8);
    let mut session = session_with(board, PieceKind::I, PieceKind::O);

    session.hard_drop();
    assert_eq!(session.lines(), 1);
    assert_eq!(session.score(), 19 + 100);
    assert_eq!(session.board().filled_count(), 0);
    assert!(session
        .take_events()
        .contains(&GameEvent::LinesCleared { count: 1 }));
}

#[test]
fn test_vertical_i_scores_four_lines() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row_except(&mut board, y, 9..10);
    }
    let mut session = session_with(board, PieceKind::I, PieceKind::O);

    assert!(session.rotate());
    while session.move_piece(1, 0) == MoveOutcome::Moved {}
    assert_eq!(session.current().x, 9);

    assert_eq!(session.hard_drop(), 16);
    assert_eq!(session.lines(), 4);
    assert_eq!(session.score(), 16 + 800);
    assert_eq!(session.level(), 1);
    assert_eq!(session.board().filled_count(), 0);
}

#[test]
fn test_large_clear_levels_up_once() {
    // Eighteen full rows under a piece resting at the spawn position
    let mut board = Board::new();
    for y in 2..20 {
        fill_row_except(&mut board, y, 0..0);
    }
    let mut session = session_with(board, PieceKind::O, PieceKind::I);

    session.lock();
    assert_eq!(session.lines(), 18);
    assert_eq!(session.score(), 800);
    assert_eq!(session.level(), 2);
    assert_eq!(session.gravity_ms(), BASE_GRAVITY_MS - GRAVITY_STEP_MS);
    assert!(!session.is_game_over());

    let events = session.take_events();
    assert!(events.contains(&GameEvent::LinesCleared { count: 18 }));
    assert!(events.contains(&GameEvent::LevelUp { level: 2 }));

    // The O settled on the floor
    assert!(session.board().is_occupied(4, 19));
    assert!(session.board().is_occupied(5, 18));
}

#[test]
fn test_gravity_fires_after_interval() {
    let mut session = session_with(Board::new(), PieceKind::O, PieceKind::I);

    assert!(!session.tick(BASE_GRAVITY_MS));
    assert_eq!(session.current().y, 0);
    assert!(session.tick(1));
    assert_eq!(session.current().y, 1);
}

#[test]
fn test_soft_drop_resets_gravity_timer() {
    let mut session = session_with(Board::new(), PieceKind::O, PieceKind::I);

    session.tick(600);
    assert!(session.apply_intent(Intent::SoftDrop));
    assert_eq!(session.current().y, 1);

    assert!(!session.tick(BASE_GRAVITY_MS));
    assert!(session.tick(1));
    assert_eq!(session.current().y, 2);
}

#[test]
fn test_move_debounce() {
    let mut session = session_with(Board::new(), PieceKind::O, PieceKind::I);

    assert!(session.apply_intent(Intent::MoveLeft));
    assert!(!session.apply_intent(Intent::MoveLeft));
    // Other channels are independent
    assert!(session.apply_intent(Intent::MoveRight));
    assert_eq!(session.current().x, 4);

    session.tick(100);
    assert!(!session.apply_intent(Intent::MoveLeft));
    session.tick(1);
    assert!(session.apply_intent(Intent::MoveLeft));
    assert_eq!(session.current().x, 3);
}

#[test]
fn test_hard_drop_debounce() {
    let mut session = session_with(Board::new(), PieceKind::O, PieceKind::I);

    assert!(session.apply_intent(Intent::HardDrop));
    assert!(!session.apply_intent(Intent::HardDrop));
    assert_eq!(session.pieces_locked(), 1);

    session.tick(201);
    assert!(session.apply_intent(Intent::HardDrop));
    assert_eq!(session.pieces_locked(), 2);
}

#[test]
fn test_game_over_and_restart() {
    // O locks at the spawn rows, so the I spawns into it
    let mut session = session_with(Board::new(), PieceKind::O, PieceKind::I);
    session.lock();

    assert!(session.is_game_over());
    assert!(session.take_events().contains(&GameEvent::GameOver));

    assert_eq!(session.move_piece(-1, 0), MoveOutcome::Blocked);
    assert!(!session.apply_intent(Intent::MoveLeft));
    assert!(!session.tick(5000));

    let snap = session.snapshot();
    assert!(snap.game_over);
    assert_eq!(snap.ghost_y, None);

    assert!(session.apply_intent(Intent::Restart));
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.episode_id(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().filled_count(), 0);
    assert_eq!(session.take_events(), vec![GameEvent::Reset]);
}

#[test]
fn test_restart_ignored_while_running() {
    let mut session = GameSession::new(5);
    assert!(!session.apply_intent(Intent::Restart));
    assert_eq!(session.episode_id(), 0);
}

#[test]
fn test_random_play_never_overlaps() {
    let mut session = GameSession::new(2024);
    let intents = [
        Intent::MoveLeft,
        Intent::Rotate,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
    ];

    for step in 0..5000usize {
        session.apply_intent(intents[step % intents.len()]);
        session.tick(16);
        if session.is_game_over() {
            break;
        }
        for (x, y) in session.current().cells() {
            assert!(!session.board().is_occupied(x, y));
        }
    }
    assert!(session.pieces_locked() > 0);
}
