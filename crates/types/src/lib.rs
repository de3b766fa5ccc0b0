//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score persistence).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (4, 0), i.e. `BOARD_WIDTH / 2 - 1`
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 100 | Gravity speed-up per level |
//! | `GRAVITY_MIN_MS` | 100 | Gravity floor |
//!
//! # Input Debounce
//!
//! A held key or a noisy pad produces many presses; the engine only accepts a
//! press when the previous accepted press of the same kind is older than:
//!
//! - `MOVE_DEBOUNCE_MS`: 100ms for left / right / soft drop (each tracked separately)
//! - `ROTATE_DEBOUNCE_MS`: 180ms
//! - `HARD_DROP_DEBOUNCE_MS`: 200ms
//!
//! # Examples
//!
//! ```
//! use arcade_tetris_types::{Color, Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_ne!(Intent::Rotate, Intent::HardDrop);
//! assert_eq!(Color::new(3).map(Color::index), Some(3));
//! assert_eq!(Color::new(0), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn anchor (top-left of the piece matrix)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Row of the spawn anchor
pub const SPAWN_Y: i8 = 0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at the starting level (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Amount the gravity interval shrinks on every level-up
pub const GRAVITY_STEP_MS: u32 = 100;

/// Gravity interval never drops below this
pub const GRAVITY_MIN_MS: u32 = 100;

/// Cumulative lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level of a fresh session
pub const START_LEVEL: u32 = 1;

/// Minimum re-trigger interval for left / right / soft drop
pub const MOVE_DEBOUNCE_MS: u32 = 100;

/// Minimum re-trigger interval for rotation
pub const ROTATE_DEBOUNCE_MS: u32 = 180;

/// Minimum re-trigger interval for hard drop
pub const HARD_DROP_DEBOUNCE_MS: u32 = 200;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock, multiplied by the level:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Clears larger than the table reuse the last entry.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Maximum length (in characters) of a player name on the score board
pub const MAX_NAME_LEN: usize = 50;

/// Number of entries shown on the score board by default
pub const DEFAULT_TOP_SCORES: usize = 10;

/// Number of entries kept in the local score file
pub const LOCAL_SCORES_CAP: usize = 100;

/// The seven piece kinds
///
/// The kind only selects the shape; the color is drawn independently.
/// - **I**: 1x4 bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **J**: bar with the hook on the right
/// - **L**: bar with the hook on the left
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];
}

/// Color index of a filled cell (1..=7)
///
/// Index 0 is reserved for "empty" in flat grids, so it is not a valid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    /// Number of distinct colors
    pub const COUNT: u8 = 7;

    /// First color index
    pub const MIN: Color = Color(1);

    /// Create a color from its index, `None` outside 1..=7
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled with the given color index
pub type Cell = Option<Color>;

/// Discrete intents raised by input devices
///
/// The engine decides whether an intent is accepted (debounce, phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Start a new game (accepted only after game over)
    Restart,
}

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece was translated
    Moved,
    /// The target placement collides; nothing changed
    Blocked,
    /// A downward move collided, so the piece was committed to the board
    Locked,
}

/// Game loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Running,
    GameOver,
}

/// Notification emitted by the session for presentation and audio layers.
///
/// Events are drained by observers; they carry no handle back into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Rotated,
    /// A piece was committed; `drop_distance` is non-zero for hard drops
    Locked { drop_distance: u32 },
    LinesCleared { count: u32 },
    LevelUp { level: u32 },
    GameOver,
    Reset,
}
