//! Piece module - tetromino layouts and the falling piece
//!
//! Every kind has four rotation states, each a list of 4 `(row, col)` cells in a
//! local 4x4 frame. Rotation simply advances the state index; there is no kick
//! search. The O piece repeats the same layout in all states.

use crate::types::{Color, PieceKind, Position};

/// Cells of one rotation state in the local 4x4 frame.
pub type CellLayout = [Position; 4];

/// Four rotation states of one kind.
pub type RotationLayouts = [CellLayout; 4];

const fn p(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

const I_LAYOUTS: RotationLayouts = [
    [p(1, 0), p(1, 1), p(1, 2), p(1, 3)],
    [p(0, 2), p(1, 2), p(2, 2), p(3, 2)],
    [p(2, 0), p(2, 1), p(2, 2), p(2, 3)],
    [p(0, 1), p(1, 1), p(2, 1), p(3, 1)],
];

const J_LAYOUTS: RotationLayouts = [
    [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(0, 2), p(1, 1), p(2, 1)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 2)],
    [p(0, 1), p(1, 1), p(2, 0), p(2, 1)],
];

const L_LAYOUTS: RotationLayouts = [
    [p(0, 2), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(1, 1), p(2, 1), p(2, 2)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 0)],
    [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
];

const O_LAYOUT: CellLayout = [p(0, 0), p(0, 1), p(1, 0), p(1, 1)];
const O_LAYOUTS: RotationLayouts = [O_LAYOUT; 4];

const S_LAYOUTS: RotationLayouts = [
    [p(0, 1), p(0, 2), p(1, 0), p(1, 1)],
    [p(0, 1), p(1, 1), p(1, 2), p(2, 2)],
    [p(1, 1), p(1, 2), p(2, 0), p(2, 1)],
    [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
];

const T_LAYOUTS: RotationLayouts = [
    [p(0, 1), p(1, 0), p(1, 1), p(1, 2)],
    [p(0, 1), p(1, 1), p(1, 2), p(2, 1)],
    [p(1, 0), p(1, 1), p(1, 2), p(2, 1)],
    [p(0, 1), p(1, 0), p(1, 1), p(2, 1)],
];

const Z_LAYOUTS: RotationLayouts = [
    [p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
    [p(0, 2), p(1, 1), p(1, 2), p(2, 1)],
    [p(1, 0), p(1, 1), p(2, 1), p(2, 2)],
    [p(0, 1), p(1, 0), p(1, 1), p(2, 0)],
];

/// Get the four rotation layouts for a piece kind
pub fn layouts(kind: PieceKind) -> &'static RotationLayouts {
    match kind {
        PieceKind::I => &I_LAYOUTS,
        PieceKind::J => &J_LAYOUTS,
        PieceKind::L => &L_LAYOUTS,
        PieceKind::O => &O_LAYOUTS,
        PieceKind::S => &S_LAYOUTS,
        PieceKind::T => &T_LAYOUTS,
        PieceKind::Z => &Z_LAYOUTS,
    }
}

/// Get the local cells for a kind at one rotation state (taken modulo 4)
pub fn get_layout(kind: PieceKind, rotation: u8) -> CellLayout {
    layouts(kind)[(rotation % 4) as usize]
}

/// Spawn offset `(row, col)` for a kind.
///
/// Most kinds sit at column 3 so their 3-wide layout is centered on the
/// 10-column board. O is 2 wide and starts one column further right. I starts
/// one row higher so its horizontal bar (layout row 1) appears on row 0.
pub fn spawn_offset(kind: PieceKind) -> Position {
    match kind {
        PieceKind::I => Position::new(-1, 3),
        PieceKind::O => Position::new(0, 4),
        _ => Position::new(0, 3),
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: u8,
    row_offset: i8,
    col_offset: i8,
}

impl Piece {
    /// Create a new piece of `kind` at its spawn offset
    pub fn new(kind: PieceKind) -> Self {
        let offset = spawn_offset(kind);
        Self {
            kind,
            rotation: 0,
            row_offset: offset.row,
            col_offset: offset.col,
        }
    }

    /// Create a piece at an explicit rotation state and offset.
    pub fn at(kind: PieceKind, rotation: u8, row_offset: i8, col_offset: i8) -> Self {
        Self {
            kind,
            rotation: rotation % 4,
            row_offset,
            col_offset,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn offset(&self) -> Position {
        Position::new(self.row_offset, self.col_offset)
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Local cells of the current rotation state
    pub fn layout(&self) -> CellLayout {
        get_layout(self.kind, self.rotation)
    }

    /// Absolute board positions of the 4 cells at the current rotation state
    pub fn cell_positions(&self) -> [Position; 4] {
        let offset = self.offset();
        self.layout().map(|cell| cell + offset)
    }

    /// Shift the offset. Legality is the caller's concern; offsets saturate
    /// at the `i8` bounds, far outside the board.
    pub fn move_by(&mut self, delta_rows: i8, delta_cols: i8) {
        self.row_offset = self.row_offset.saturating_add(delta_rows);
        self.col_offset = self.col_offset.saturating_add(delta_cols);
    }

    /// Advance the rotation state by one (cyclic).
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Step the rotation state back by one (cyclic).
    pub fn undo_rotation(&mut self) {
        self.rotation = (self.rotation + 3) % 4;
    }

    /// Candidate copy shifted by the delta; `self` is untouched.
    #[must_use]
    pub fn moved(&self, delta_rows: i8, delta_cols: i8) -> Self {
        let mut next = *self;
        next.move_by(delta_rows, delta_cols);
        next
    }

    /// Candidate copy at the next rotation state; `self` is untouched.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut next = *self;
        next.rotate();
        next
    }
}
