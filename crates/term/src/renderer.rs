//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; after that only changed runs of cells are written. Each frame goes
//! out in a single `write_all`.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Diffing renderer over any byte sink (stdout in the game).
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
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
        Self::with_writer(io::stdout())
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
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
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Force the next draw to be a full redraw (after a terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds the previous frame, ready to be cleared and reused.
    /// Returns the number of cells written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let written = match self.last.take() {
            Some(mut prev) if prev.same_size(fb) => {
                let n = encode_diff_into(&prev, fb, &mut self.buf)?;
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
                n
            }
            stale => {
                let n = encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
                n
            }
        };
        self.flush_buf()?;
        Ok(written)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes cells, emitting style changes only when the style differs from the
/// previous cell.
struct CellWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    cells: usize,
}

impl<'a> CellWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            cells: 0,
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                apply_style_into(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        self.cells += cells.len();
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(self.cells)
    }
}

/// Encode a full-frame redraw into `out`; returns the number of cells written.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = CellWriter::new(out);
    for y in 0..fb.height() {
        w.move_to(0, y)?;
        w.cells(fb.row(y))?;
    }
    w.finish()
}

/// Encode only the cells that differ from `prev`; returns the number of
/// cells written.
///
/// Both buffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let mut w = CellWriter::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, end) in changed_runs(prev.row(y), row) {
            w.move_to(start as u16, y)?;
            w.cells(&row[start..end])?;
        }
    }
    w.finish()
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Half-open `[start, end)` column ranges where the rows differ.
///
/// Cells missing from `prev` count as changed.
fn changed_runs<'a>(prev: &'a [Cell], next: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let differs = move |x: usize| prev.get(x) != Some(&next[x]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some((start, x))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_frame(rows: &[&str]) -> FrameBuffer {
        let w = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let mut fb = FrameBuffer::new(w, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            fb.put_str(0, y as u16, row, CellStyle::default());
        }
        fb
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let fb = text_frame(&["AB", "CD"]);
        let mut out = Vec::new();
        assert_eq!(encode_full_into(&fb, &mut out).unwrap(), 4);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        let rgb = Rgb::new(231, 76, 60);
        assert_eq!(rgb_to_color(rgb), Color::Rgb { r: 231, g: 76, b: 60 });
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = text_frame(&[".....", "....."]);
        let b = text_frame(&[".XXX.", "X...X"]);
        assert_eq!(changed_runs(a.row(0), b.row(0)).collect::<Vec<_>>(), vec![(1, 4)]);
        assert_eq!(
            changed_runs(a.row(1), b.row(1)).collect::<Vec<_>>(),
            vec![(0, 1), (4, 5)]
        );
        assert_eq!(changed_runs(a.row(0), a.row(0)).count(), 0);
    }

    #[test]
    fn draw_swap_writes_only_changes_after_first_frame() {
        let mut r = TerminalRenderer::with_writer(Vec::new());

        let mut fb = text_frame(&["GAME", "OVER"]);
        assert_eq!(r.draw_swap(&mut fb).unwrap(), 8);

        // Same content again: nothing to write
        let mut fb = text_frame(&["GAME", "OVER"]);
        assert_eq!(r.draw_swap(&mut fb).unwrap(), 0);

        let mut fb = text_frame(&["GAME", "OVEN"]);
        assert_eq!(r.draw_swap(&mut fb).unwrap(), 1);
        // The caller gets the previous frame back
        assert_eq!(fb.get(3, 1).unwrap().ch, 'R');
    }

    #[test]
    fn invalidate_and_resize_force_full_redraw() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = text_frame(&["AB"]);
        r.draw_swap(&mut fb).unwrap();

        r.invalidate();
        let mut fb = text_frame(&["AB"]);
        assert_eq!(r.draw_swap(&mut fb).unwrap(), 2);

        let mut fb = text_frame(&["ABC"]);
        assert_eq!(r.draw_swap(&mut fb).unwrap(), 3);
        assert!(!r.writer().is_empty());
    }
}
