//! GameView: maps the simulation state into a terminal framebuffer.
//!
//! This module is pure (no I/O). The board snapshot already carries the
//! falling-piece overlay, so the view only reads cells, the HUD numbers,
//! the next-piece preview, and the advisory lines.

use blockfall_core::Game;
use blockfall_types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

/// A lightweight terminal view for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, game: &Game, highscore: u32, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let frame_w = board_px_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) + 2;

        // Board on the left third, panel beside it.
        let start_x = viewport.width.saturating_sub(frame_w + 22) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
        };
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let cell = game
                    .board()
                    .get(x as i8, y as i8)
                    .unwrap_or(Cell::Empty);
                self.draw_board_cell(&mut fb, start_x, start_y, x, y, cell);
            }
        }

        self.draw_side_panel(&mut fb, game, highscore, start_x + frame_w + 2, start_y);

        if game.game_over() {
            self.draw_game_over(&mut fb, game, highscore, start_x, start_y, frame_w, frame_h);
        }

        fb
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        cell: Cell,
    ) {
        let (ch, style) = match cell {
            Cell::Empty => (
                '·',
                CellStyle {
                    fg: Rgb::new(90, 90, 100),
                    bg: BOARD_BG,
                    bold: false,
                },
            ),
            Cell::Locked(kind) => (
                '█',
                CellStyle {
                    fg: shape_color(kind),
                    bg: BOARD_BG,
                    bold: false,
                },
            ),
            Cell::Garbage => (
                '█',
                CellStyle {
                    fg: Rgb::new(150, 150, 150),
                    bg: BOARD_BG,
                    bold: false,
                },
            ),
            Cell::Falling(kind) => (
                '█',
                CellStyle {
                    fg: shape_color(kind),
                    bg: BOARD_BG,
                    bold: true,
                },
            ),
        };

        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y;
        for dx in 0..self.cell_w {
            fb.put_char(px + dx, py, ch, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        highscore: u32,
        x: u16,
        y: u16,
    ) {
        let label = CellStyle {
            fg: Rgb::new(160, 160, 170),
            bg: PANEL_BG,
            bold: false,
        };
        let value = CellStyle {
            fg: Rgb::new(230, 230, 230),
            bg: PANEL_BG,
            bold: true,
        };
        let warn = CellStyle {
            fg: Rgb::new(230, 120, 80),
            bg: PANEL_BG,
            bold: true,
        };
        let calm = CellStyle {
            fg: Rgb::new(120, 200, 230),
            bg: PANEL_BG,
            bold: false,
        };

        fb.put_str(x, y, &format!("Mode  {}", game.mode_kind().name()), label);
        fb.put_str(x, y + 1, &format!("Score {}", game.score()), value);
        fb.put_str(x, y + 2, &format!("Level {}", game.level()), value);
        fb.put_str(x, y + 3, &format!("Lines {}", game.lines()), value);
        fb.put_str(x, y + 4, &format!("Best  {}", highscore), label);

        fb.put_str(x, y + 6, "Next:", label);
        let next = game.next();
        for (i, row) in next.cells.iter().enumerate() {
            for (j, occupied) in row.iter().enumerate() {
                let ch = if *occupied { '█' } else { ' ' };
                let style = CellStyle {
                    fg: shape_color(next.kind),
                    bg: PANEL_BG,
                    bold: false,
                };
                let px = x + (j as u16) * self.cell_w;
                for dx in 0..self.cell_w {
                    fb.put_char(px + dx, y + 7 + i as u16, ch, style);
                }
            }
        }

        // Effect advisories.
        let effects = game.effects();
        let mut line = y + 12;
        if effects.speed_pending() {
            fb.put_str(x, line, "speed x3 queued!", warn);
            line += 1;
        }
        if effects.speed_active() {
            fb.put_str(x, line, "speed x3!", warn);
            line += 1;
        }
        if effects.slow_active() {
            fb.put_str(x, line, "slow x3", calm);
            line += 1;
        }

        let note = game.side_note();
        if !note.is_empty() {
            fb.put_str(x, line, &note, calm);
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        highscore: u32,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 30, 30),
            bold: true,
        };
        let text = "GAME OVER";
        let tx = start_x + frame_w.saturating_sub(text.len() as u16) / 2;
        let ty = start_y + frame_h / 2;
        fb.put_str(tx, ty, text, style);

        if game.score() > highscore {
            let best = "new best!";
            let bx = start_x + frame_w.saturating_sub(best.len() as u16) / 2;
            fb.put_str(bx, ty + 1, best, style);
        }
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
}
