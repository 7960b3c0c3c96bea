//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; after that only runs of changed cells are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. After the call
    /// `fb` holds the previous frame's contents and can be re-rendered into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.buf)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queues glyphs, emitting style commands only when the style changes.
struct StyledWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> StyledWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(SetForegroundColor(to_term_color(style.fg)))?;
            self.out.queue(SetBackgroundColor(to_term_color(style.bg)))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    /// Reset attributes if anything was styled.
    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(ResetColor)?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Encode a clear-screen plus every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = StyledWriter::new(out);
    for y in 0..fb.height() {
        w.move_to(0, y)?;
        for x in 0..fb.width() {
            w.put(fb.get(x, y).unwrap_or_default())?;
        }
    }
    w.finish()
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Nothing is written when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = StyledWriter::new(out);
    for (x, y, len) in changed_runs(prev, next) {
        w.move_to(x, y)?;
        for dx in 0..len {
            w.put(next.get(x + dx, y).unwrap_or_default())?;
        }
    }
    w.finish()
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Horizontal runs `(x, y, len)` of cells that differ between two frames.
///
/// Frames of different size yield every row in full.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let mut runs = Vec::new();
        if !same_size {
            runs.push((0, y, w));
            return runs;
        }
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
        runs
    })
}
