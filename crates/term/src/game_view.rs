//! GameView: maps a core `RenderState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_layout, RenderState};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{
    Color, PieceKind, BACKGROUND_COLOR, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL_COLOR, PANEL_COLOR,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const WHITE: Color = Color::new(255, 255, 255);
const BLACK: Color = Color::new(0, 0, 0);

/// Minimum panel width (in terminal columns) before the side panel is drawn.
const MIN_PANEL_W: u16 = 12;

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame size including the border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the render state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &RenderState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(WHITE, BACKGROUND_COLOR),
        });

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(PANEL_COLOR, BACKGROUND_COLOR),
        );

        // Locked board cells (visible rows only).
        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                match snap.cell(row, col).flatten() {
                    Some(color) => self.draw_board_cell(fb, start_x, start_y, row, col, color),
                    None => self.draw_empty_cell(fb, start_x, start_y, row, col),
                }
            }
        }

        // Falling piece; cells still in the hidden margin are not drawn.
        if let Some(current) = snap.current {
            for cell in current.cells.iter() {
                if cell.row >= 0 && cell.row < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, start_x, start_y, cell.row, cell.col, current.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RenderState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: i8, col: i8) {
        let style = CellStyle {
            fg: PANEL_COLOR,
            bg: EMPTY_CELL_COLOR,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, row, col, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: i8,
        col: i8,
        color: Color,
    ) {
        let style = CellStyle {
            fg: color,
            bg: EMPTY_CELL_COLOR,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, row, col, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + (col as u16) * self.cell_w;
        let py = start_y + 1 + (row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RenderState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < MIN_PANEL_W {
            return;
        }

        let label = CellStyle {
            fg: WHITE,
            bg: BACKGROUND_COLOR,
            bold: true,
            dim: false,
        };
        let value = CellStyle::new(WHITE, PANEL_COLOR);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.fill_rect(panel_x, y, MIN_PANEL_W, 1, ' ', value);
        fb.put_u32(panel_x + 1, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.fill_rect(panel_x, y, MIN_PANEL_W, 1, ' ', value);
        fb.put_u32(panel_x + 1, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 6, y, snap.next_kind.as_str(), label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next_kind, value);
    }

    /// Next piece in its spawn orientation on a 4x4 panel box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, panel: CellStyle) {
        let box_w = 4 * self.cell_w + 2;
        fb.fill_rect(x, y, box_w, 4 * self.cell_h + 2, ' ', panel);
        let style = CellStyle {
            fg: kind.color(),
            bg: panel.bg,
            bold: true,
            dim: false,
        };
        for cell in get_layout(kind, 0) {
            let px = x + 1 + (cell.col as u16) * self.cell_w;
            let py = y + 1 + (cell.row as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: WHITE,
            bg: BLACK,
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}
