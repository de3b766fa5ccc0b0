//! Pieces module - piece catalog and matrix rotation
//!
//! Every piece is a small occupancy matrix (at most 4x4) anchored at its
//! top-left corner. Rotation produces a new matrix value; nothing is rotated
//! in place, so copies held elsewhere (ghost projection, snapshots) stay valid.

use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest bounding box side of any piece
pub const MAX_SIDE: usize = 4;

/// Occupancy matrix of a piece, stored as fixed 4x4 rows.
///
/// Only the `width` x `height` top-left region is meaningful; cells outside it
/// are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl Matrix {
    /// Build a matrix from `0`/`1` rows.
    ///
    /// Values outside the `width` x `height` region are ignored.
    pub const fn new(width: u8, height: u8, rows: [[u8; MAX_SIDE]; MAX_SIDE]) -> Self {
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        let mut y = 0;
        while y < height as usize {
            let mut x = 0;
            while x < width as usize {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at (x, y) inside the bounding box is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.cells[y][x]
    }

    /// Iterate occupied cells as (x, y) offsets from the anchor
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    ///
    /// Row `r` of the result is column `r` of `self` read bottom-to-top.
    pub fn rotate_cw(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const I_SHAPE: Matrix = Matrix::new(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Matrix = Matrix::new(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Matrix = Matrix::new(3, 2, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const J_SHAPE: Matrix = Matrix::new(3, 2, [[1, 1, 1, 0], [0, 0, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Matrix = Matrix::new(3, 2, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
const S_SHAPE: Matrix = Matrix::new(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Matrix = Matrix::new(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Get the spawn matrix for a piece kind
pub fn get_shape(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// A piece placed on (or above) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub color: Color,
    /// Column of the matrix's top-left corner
    pub x: i8,
    /// Row of the matrix's top-left corner; negative while above the board
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn anchor in its catalog orientation
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            matrix: get_shape(kind),
            color,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Copy translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with the matrix rotated clockwise, anchor unchanged
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotate_cw(),
            ..*self
        }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
