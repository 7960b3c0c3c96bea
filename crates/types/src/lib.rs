//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - **Hidden margin**: 2 rows above the visible board (indexed -2 and -1)
//!
//! Coordinates are `(row, col)` with row 0 at the top of the visible board and
//! rows growing downward.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 300 | Default gravity interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameKey, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let p = Position::new(1, 2) + Position::new(3, 4);
//! assert_eq!(p, Position::new(4, 6));
//!
//! assert_eq!(GameKey::from_str("rotate"), Some(GameKey::Rotate));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::ops::Add;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Rows above the visible board where pieces may spawn partially off-screen.
pub const HIDDEN_ROWS: u8 = 2;

/// Total number of stored rows (hidden margin + visible board).
pub const TOTAL_ROWS: usize = (HIDDEN_ROWS + BOARD_HEIGHT) as usize;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default gravity interval: one `MoveDown` every 300ms.
pub const DROP_INTERVAL_MS: u32 = 300;

/// Points awarded per lock, indexed by the number of rows cleared.
///
/// Strictly increasing in the number of rows, so a single four-row clear is
/// worth more than any combination of smaller clears of the same rows.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points for every row a piece descends through a manual fast drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// A board coordinate: `row` grows downward, `col` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// Saturating: a sum past the `i8` range clamps, which is always off the board.
impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            row: self.row.saturating_add(rhs.row),
            col: self.col.saturating_add(rhs.col),
        }
    }
}

/// 24-bit RGB color of a locked or falling cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background of empty board cells.
pub const EMPTY_CELL_COLOR: Color = Color::new(31, 31, 88);

/// Window background around the board.
pub const BACKGROUND_COLOR: Color = Color::new(89, 79, 126);

/// Panel background behind the score and next-piece boxes.
pub const PANEL_COLOR: Color = Color::new(142, 130, 177);

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Orange, four in a row
/// - **J**: Red
/// - **L**: Green (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Purple
/// - **T**: Cyan
/// - **Z**: Blue (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in a fixed order; `ALL[k.index()] == k`.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Fixed display color of this kind.
    pub fn color(self) -> Color {
        match self {
            PieceKind::L => Color::new(47, 230, 23),
            PieceKind::J => Color::new(232, 18, 18),
            PieceKind::I => Color::new(226, 116, 17),
            PieceKind::O => Color::new(237, 234, 4),
            PieceKind::S => Color::new(166, 0, 247),
            PieceKind::T => Color::new(21, 204, 209),
            PieceKind::Z => Color::new(13, 64, 216),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single uppercase letter, used by the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked cell with the color of the piece that filled it
pub type Cell = Option<Color>;

/// Discrete game inputs understood by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Shift the falling piece one column left
    Left,
    /// Shift the falling piece one column right
    Right,
    /// Manual fast drop: one row down, awarding soft-drop points
    Down,
    /// Advance the rotation state (no wall kicks)
    Rotate,
    /// Start a fresh game, subject to the [`RestartPolicy`]
    Restart,
}

impl GameKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameKey::Left),
            "right" => Some(GameKey::Right),
            "down" => Some(GameKey::Down),
            "rotate" => Some(GameKey::Rotate),
            "restart" => Some(GameKey::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKey::Left => "left",
            GameKey::Right => "right",
            GameKey::Down => "down",
            GameKey::Rotate => "rotate",
            GameKey::Restart => "restart",
        }
    }
}

/// When a `Restart` key is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RestartPolicy {
    /// Restart at any moment, mid-game included.
    #[default]
    Anytime,
    /// Restart only after the game has ended.
    GameOverOnly,
}

impl RestartPolicy {
    /// Accepts `anytime` or `game_over` (also `game-over`, `gameover`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "anytime" | "always" => Some(RestartPolicy::Anytime),
            "game_over" | "game-over" | "gameover" => Some(RestartPolicy::GameOverOnly),
            _ => None,
        }
    }

    pub fn allows(&self, game_over: bool) -> bool {
        match self {
            RestartPolicy::Anytime => true,
            RestartPolicy::GameOverOnly => game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_add_saturates() {
        assert_eq!(Position::new(120, 0) + Position::new(10, -3), Position::new(127, -3));
        assert_eq!(Position::new(-120, 5) + Position::new(-10, 0), Position::new(-128, 5));
    }

    #[test]
    fn line_scores_strictly_increase() {
        assert_eq!(LINE_SCORES[0], 0);
        for pair in LINE_SCORES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn kind_index_matches_all_table() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn kinds_have_distinct_colors() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(a.color(), b.color());
                }
            }
            assert_ne!(a.color(), EMPTY_CELL_COLOR);
        }
    }

    #[test]
    fn game_key_round_trips_names() {
        for key in [
            GameKey::Left,
            GameKey::Right,
            GameKey::Down,
            GameKey::Rotate,
            GameKey::Restart,
        ] {
            assert_eq!(GameKey::from_str(key.as_str()), Some(key));
        }
        assert_eq!(GameKey::from_str("hardDrop"), None);
    }

    #[test]
    fn restart_policy_parsing_and_gate() {
        assert_eq!(RestartPolicy::from_str("anytime"), Some(RestartPolicy::Anytime));
        assert_eq!(
            RestartPolicy::from_str(" Game_Over "),
            Some(RestartPolicy::GameOverOnly)
        );
        assert_eq!(RestartPolicy::from_str("never"), None);

        assert!(RestartPolicy::Anytime.allows(false));
        assert!(!RestartPolicy::GameOverOnly.allows(false));
        assert!(RestartPolicy::GameOverOnly.allows(true));
    }
}
