use criterion::{black_box, criterion_group, criterion_main, Criterion};
use arcade_tetris::core::{collides, Board, GameSession, Piece};
use arcade_tetris::types::{Color, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.reset();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Color::new(1));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.reset();
            }
            session.hard_drop();
        })
    });
}

fn bench_move_piece(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            session.move_piece(1, 0);
            session.move_piece(-1, 0);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(12345);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.rotate();
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Color::new(2));
    }
    let piece = Piece::new(PieceKind::T, Color::MIN);

    c.bench_function("collides", |b| {
        b.iter(|| collides(black_box(&piece), black_box(&board), 0, black_box(17)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move_piece,
    bench_rotate,
    bench_collides
);
criterion_main!(benches);
