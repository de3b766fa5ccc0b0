//! Pieces tests - catalog shapes, rotation and random draws

use std::collections::HashSet;

use arcade_tetris::core::{get_shape, Matrix, Piece, PieceGenerator};
use arcade_tetris::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

fn rows_of(m: &Matrix) -> Vec<Vec<u8>> {
    (0..m.height() as usize)
        .map(|y| {
            (0..m.width() as usize)
                .map(|x| m.is_filled(x, y) as u8)
                .collect()
        })
        .collect()
}

#[test]
fn test_catalog_shapes() {
    assert_eq!(rows_of(&get_shape(PieceKind::I)), vec![vec![1, 1, 1, 1]]);
    assert_eq!(rows_of(&get_shape(PieceKind::O)), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(
        rows_of(&get_shape(PieceKind::T)),
        vec![vec![0, 1, 0], vec![1, 1, 1]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::J)),
        vec![vec![1, 1, 1], vec![0, 0, 1]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::L)),
        vec![vec![1, 1, 1], vec![1, 0, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::S)),
        vec![vec![0, 1, 1], vec![1, 1, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::Z)),
        vec![vec![1, 1, 0], vec![0, 1, 1]]
    );
}

#[test]
fn test_rotation_preserves_cell_count() {
    for kind in PieceKind::ALL {
        let mut m = get_shape(kind);
        for _ in 0..4 {
            m = m.rotate_cw();
            assert_eq!(m.filled_count(), 4, "{:?}", kind);
        }
    }
}

#[test]
fn test_rotate_s_clockwise() {
    // [0 1 1]      [1 0]
    // [1 1 0]  ->  [1 1]
    //              [0 1]
    let r = get_shape(PieceKind::S).rotate_cw();
    assert_eq!(rows_of(&r), vec![vec![1, 0], vec![1, 1], vec![0, 1]]);
}

#[test]
fn test_rotate_l_clockwise() {
    // [1 1 1]      [1 1]
    // [1 0 0]  ->  [0 1]
    //              [0 1]
    let r = get_shape(PieceKind::L).rotate_cw();
    assert_eq!(rows_of(&r), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
}

#[test]
fn test_piece_shifted_moves_every_cell() {
    let p = Piece::new(PieceKind::T, Color::MIN);
    assert_eq!((p.x, p.y), (SPAWN_X, SPAWN_Y));

    let moved = p.shifted(-2, 3);
    let before: Vec<_> = p.cells().map(|(x, y)| (x - 2, y + 3)).collect();
    let after: Vec<_> = moved.cells().collect();
    assert_eq!(before, after);
}

#[test]
fn test_generator_is_deterministic() {
    let mut a = PieceGenerator::new(42);
    let mut b = PieceGenerator::new(42);
    for _ in 0..50 {
        assert_eq!(a.draw(), b.draw());
    }
}

#[test]
fn test_generator_covers_kinds_and_colors() {
    let mut generator = PieceGenerator::new(7);
    let mut kinds = HashSet::new();
    let mut colors = HashSet::new();
    for _ in 0..500 {
        let p = generator.draw();
        assert_eq!((p.x, p.y), (SPAWN_X, SPAWN_Y));
        assert!(Color::new(p.color.index()).is_some());
        kinds.insert(p.kind);
        colors.insert(p.color);
    }
    assert_eq!(kinds.len(), PieceKind::ALL.len());
    assert_eq!(colors.len(), Color::COUNT as usize);
}

#[test]
fn test_shape_and_color_are_independent() {
    // Some shape must show up in more than one color
    let mut generator = PieceGenerator::new(99);
    let mut pairs = HashSet::new();
    for _ in 0..500 {
        let p = generator.draw();
        pairs.insert((p.kind, p.color));
    }
    assert!(pairs.len() > PieceKind::ALL.len());
}
