//! Board module - manages the game grid
//!
//! The board is a 10x20 grid plus a 2-row hidden margin above the visible area,
//! where each cell can be empty or filled with the color of a locked piece.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges -2..19 (top to bottom, negative rows
//! are the hidden margin) and col ranges 0..9 (left to right).
//!
//! Anything outside the stored rows and columns reads as occupied, so walls,
//! floor and the sky above the margin all collide.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, Position, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, TOTAL_ROWS};

/// Total number of stored cells
const BOARD_SIZE: usize = TOTAL_ROWS * BOARD_WIDTH as usize;

const WIDTH: usize = BOARD_WIDTH as usize;

/// Topmost stored row (first hidden row)
pub const TOP_ROW: i8 = -(HIDDEN_ROWS as i8);

/// Row indices of full rows, bottom to top.
pub type FullRows = ArrayVec<i8, TOTAL_ROWS>;

/// The game board - 10 columns x (2 hidden + 20 visible) rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order ((row + HIDDEN_ROWS) * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if !Self::contains(row, col) {
            return None;
        }
        Some(Self::row_start(row) + col as usize)
    }

    #[inline(always)]
    fn row_start(row: i8) -> usize {
        (row - TOP_ROW) as usize * WIDTH
    }

    #[inline(always)]
    fn contains(row: i8, col: i8) -> bool {
        col >= 0 && col < BOARD_WIDTH as i8 && row >= TOP_ROW && row < BOARD_HEIGHT as i8
    }

    #[inline(always)]
    fn contains_row(row: i8) -> bool {
        row >= TOP_ROW && row < BOARD_HEIGHT as i8
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get visible height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if (row, col) is inside the board and empty.
    ///
    /// Out-of-bounds cells are never empty. Hidden-margin rows report their
    /// stored state.
    pub fn is_cell_empty(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if every position is inside the board and empty
    pub fn fits(&self, cells: &[Position]) -> bool {
        cells.iter().all(|c| self.is_cell_empty(c.row, c.col))
    }

    /// Check if a piece can occupy its current cells
    pub fn can_place(&self, piece: &Piece) -> bool {
        self.fits(&piece.cell_positions())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i8) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row has no filled cells (out-of-range rows count as empty)
    pub fn is_row_empty(&self, row: i8) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_none()))
            .unwrap_or(true)
    }

    /// Empty every cell in a row
    pub fn clear_row(&mut self, row: i8) {
        if !Self::contains_row(row) {
            return;
        }
        let start = Self::row_start(row);
        self.cells[start..start + WIDTH].fill(None);
    }

    /// Copy `row` into `row + num_rows`, then clear `row`
    pub fn move_row_down(&mut self, row: i8, num_rows: i8) {
        let target = row + num_rows;
        if num_rows <= 0 || !Self::contains_row(row) || !Self::contains_row(target) {
            debug_assert!(num_rows >= 0, "rows only ever move down");
            return;
        }
        let src = Self::row_start(row);
        let dst = Self::row_start(target);
        self.cells.copy_within(src..src + WIDTH, dst);
        self.clear_row(row);
    }

    /// Indices of all full rows, sorted bottom to top (zero-allocation)
    pub fn full_rows(&self) -> FullRows {
        let mut rows = FullRows::new();
        for row in (TOP_ROW..BOARD_HEIGHT as i8).rev() {
            if self.is_row_full(row) {
                rows.push(row);
            }
        }
        rows
    }

    /// Clear all full rows in a single bottom-to-top pass and return how many
    /// were cleared.
    ///
    /// Each non-full row moves down by the number of full rows found below it,
    /// so several simultaneous clears compact correctly.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut completed: i8 = 0;
        for row in (TOP_ROW..BOARD_HEIGHT as i8).rev() {
            if self.is_row_full(row) {
                self.clear_row(row);
                completed += 1;
            } else if completed > 0 {
                self.move_row_down(row, completed);
            }
        }
        completed as usize
    }

    /// Write a piece's cells onto the board with the piece's color.
    ///
    /// The caller must have validated the placement; locking onto an occupied
    /// or out-of-bounds cell is a logic error.
    pub fn lock_piece(&mut self, piece: &Piece) {
        debug_assert!(
            self.can_place(piece),
            "lock_piece called with an invalid placement: {:?}",
            piece
        );
        let color = piece.color();
        for cell in piece.cell_positions() {
            self.set(cell.row, cell.col, Some(color));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of one stored row, or None if the row is outside the board
    pub fn row(&self, row: i8) -> Option<&[Cell]> {
        if !Self::contains_row(row) {
            return None;
        }
        let start = Self::row_start(row);
        Some(&self.cells[start..start + WIDTH])
    }

    /// Number of filled cells, hidden margin included
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Copy every stored row (hidden margin first) into a fixed 2D grid.
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; TOTAL_ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(WIDTH)) {
            dst.copy_from_slice(src);
        }
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
