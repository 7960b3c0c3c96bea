//! Read-only render snapshot handed to the frontend once per frame.

use crate::piece::Piece;
use crate::types::{Cell, Color, PieceKind, Position, BOARD_WIDTH, HIDDEN_ROWS, TOTAL_ROWS};

/// Stored board rows, hidden margin first (`grid[0]` is row -2).
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; TOTAL_ROWS];

/// The falling piece as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub kind: PieceKind,
    pub cells: [Position; 4],
    pub color: Color,
}

impl From<Piece> for PieceView {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            cells: value.cell_positions(),
            color: value.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub board: BoardGrid,
    /// `None` once the game is over.
    pub current: Option<PieceView>,
    pub next_kind: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl RenderState {
    /// Cell at a board coordinate (`row` may be negative for the hidden margin).
    pub fn cell(&self, row: i8, col: i8) -> Option<Cell> {
        let r = usize::try_from(row as i16 + HIDDEN_ROWS as i16).ok()?;
        let c = usize::try_from(col).ok()?;
        self.board.get(r)?.get(c).copied()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; TOTAL_ROWS],
            current: None,
            next_kind: PieceKind::I,
            score: 0,
            lines: 0,
            game_over: false,
        }
    }
}
