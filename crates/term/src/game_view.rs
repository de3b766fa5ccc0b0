//! GameView: maps a `GameSnapshot` plus HUD state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::effects::Effects;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::scores::ScoreEntry;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

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

/// Everything on screen that does not come from the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudView<'a> {
    /// Score server reachable
    pub db_online: bool,
    pub top_scores: &'a [ScoreEntry],
    /// Name being typed on the game-over screen
    pub name_entry: Option<&'a str>,
    /// One-line persistence status ("Saving...", "Saved", ...)
    pub status: Option<&'a str>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Widest top-score table row: rank, name, score, date
const TOP_ROW_FULL_W: u16 = 40;

/// Side panel needs at least this many columns to be drawn at all
const PANEL_MIN_W: u16 = 12;

/// Palette for color indices 1..=7
pub fn palette(index: u8) -> Option<Rgb> {
    match index {
        1 => Some(Rgb::from_hex(0xe74c3c)),
        2 => Some(Rgb::from_hex(0x3498db)),
        3 => Some(Rgb::from_hex(0x2ecc71)),
        4 => Some(Rgb::from_hex(0xf1c40f)),
        5 => Some(Rgb::from_hex(0x9b59b6)),
        6 => Some(Rgb::from_hex(0x1abc9c)),
        7 => Some(Rgb::from_hex(0xe67e22)),
        _ => None,
    }
}

#[derive(Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        fx: &Effects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = if fx.flash().is_some() {
            CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold()
        } else {
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG)
        };

        // Background for play area.
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);

        self.draw_border(fb, &frame, border);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match palette(snap.board[y as usize][x as usize]) {
                    Some(rgb) => self.draw_block(fb, &frame, x as i8, y as i8, rgb),
                    None => self.draw_empty_cell(fb, &frame, x, y),
                }
            }
        }

        if !snap.game_over {
            // Ghost piece.
            if let Some(ghost_y) = snap.ghost_y {
                let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                let ghost = Piece {
                    y: ghost_y,
                    ..snap.active
                };
                for (x, y) in ghost.cells() {
                    if in_board(x, y) {
                        self.fill_cell_rect(fb, &frame, x as u16, y as u16, '░', ghost_style);
                    }
                }
            }

            // Active piece.
            let rgb = palette(snap.active.color.index()).unwrap_or(Rgb::new(200, 200, 200));
            for (x, y) in snap.active.cells() {
                if in_board(x, y) {
                    self.draw_block(fb, &frame, x, y, rgb);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, &frame);

        // Overlays.
        if snap.game_over {
            self.draw_game_over(fb, snap, hud, &frame);
        } else if let Some(level) = fx.banner() {
            self.draw_level_banner(fb, &frame, level);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        fx: &Effects,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, fx, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: &Frame, style: CellStyle) {
        let Frame { x, y, w, h } = *frame;
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: &Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: &Frame, x: i8, y: i8, fg: Rgb) {
        let style = CellStyle::new(fg, BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x as u16, y as u16, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        frame: &Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next = snap.next;
        let next_rgb = palette(next.color.index()).unwrap_or(value.fg);
        let block = CellStyle::new(next_rgb, PANEL_BG).bold();
        for (dx, dy) in next.matrix.filled_cells() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', block);
        }
        y = y.saturating_add(next.matrix.height() as u16 * self.cell_h + 1);

        fb.put_str(panel_x, y, "DB", label);
        if hud.db_online {
            fb.put_str(panel_x + 3, y, "ONLINE", value.with_fg(Rgb::from_hex(0x2ecc71)));
        } else {
            fb.put_str(panel_x + 3, y, "OFFLINE", value.with_fg(Rgb::from_hex(0xe74c3c)));
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TOP SCORES", label);
        y = y.saturating_add(1);
        if hud.top_scores.is_empty() {
            fb.put_str(panel_x, y, "-", dim);
            return;
        }
        for (i, entry) in hud.top_scores.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            self.draw_top_row(fb, panel_x, panel_w, y, i + 1, entry, value, dim);
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_top_row(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        w: u16,
        y: u16,
        rank: usize,
        entry: &ScoreEntry,
        value: CellStyle,
        dim: CellStyle,
    ) {
        fb.put_u32(x, y, rank as u32, dim);
        let name_x = x + 3;
        let name_w: usize = if w >= TOP_ROW_FULL_W { 12 } else { 6 };
        let name: String = entry.name.chars().take(name_w).collect();
        fb.put_str(name_x, y, &name, value);
        let score_x = name_x + name_w as u16 + 1;
        fb.put_u32(score_x, y, entry.score, value);
        if w >= TOP_ROW_FULL_W + 10 {
            fb.put_str(score_x + 9, y, &entry.display_date(), dim);
        }
    }

    fn draw_level_banner(&self, fb: &mut FrameBuffer, frame: &Frame, level: u32) {
        let style = CellStyle::new(Rgb::from_hex(0xf1c40f), PANEL_BG).bold();
        let y = frame.y.saturating_add(frame.h / 3);
        let text = format!("LEVEL {}", level);
        fb.put_str_centered(frame.x, frame.w, y, &text, style);
        fb.put_str_centered(frame.x, frame.w, y + 1, "SPEED UP", CellStyle { bold: false, ..style });
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &HudView<'_>, frame: &Frame) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let text = CellStyle { bold: false, ..title };
        let hint = text.dim();

        let inner_w = frame.w.saturating_sub(2);
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let top = mid_y.saturating_sub(3);
        // Blank band so the text stays readable over the stack
        fb.fill_rect(frame.x + 1, top, inner_w, 7, ' ', text);

        fb.put_str_centered(frame.x, frame.w, top, "GAME OVER", title);
        fb.put_str_centered(frame.x, frame.w, top + 1, &format!("SCORE {}", snap.score), text);

        if let Some(name) = hud.name_entry {
            // Keep the tail of long names visible
            let room = inner_w.saturating_sub(8) as usize;
            let len = name.chars().count();
            let shown: String = name.chars().skip(len.saturating_sub(room)).collect();
            fb.put_str(frame.x + 2, top + 3, "NAME:", text);
            fb.put_str(frame.x + 8, top + 3, &shown, title);
            let cursor_x = frame.x + 8 + shown.chars().count() as u16;
            if cursor_x < frame.x + frame.w - 1 {
                fb.put_char(cursor_x, top + 3, '_', title);
            }
            fb.put_str_centered(frame.x, frame.w, top + 4, "ENTER save", hint);
        }
        // R types into the name while the prompt is open
        let restart = if hud.name_entry.is_some() {
            "ESC restart"
        } else {
            "ESC/R restart"
        };
        fb.put_str_centered(frame.x, frame.w, top + 5, restart, hint);

        if let Some(status) = hud.status {
            fb.put_str_centered(frame.x, frame.w, top + 6, status, text);
        }
    }
}

fn in_board(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}
