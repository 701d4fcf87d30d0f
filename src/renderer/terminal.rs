//! Character-grid rasteriser for the terminal backend
//!
//! Arena pixels are scaled onto the grid; rectangles become background
//! coloured cells. Only cells that changed since the previous frame are
//! written out.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use super::Renderer;
use crate::Color;
use crate::sim::{Arena, Rect};

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    /// None = terminal default background
    pub bg: Option<Color>,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::WHITE,
        bg: None,
    };
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    arena: Arena,
    cells: Vec<Cell>,
    /// What the terminal currently shows; None forces a full redraw
    shown: Option<Vec<Cell>>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, arena: Arena) -> Self {
        Self {
            cols,
            rows,
            arena,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
            shown: None,
        }
    }

    pub fn grid_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Terminal was resized
    pub fn resize_grid(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
        self.shown = None;
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Characters of one row, for debugging and tests
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row).map(|c| c.ch))
            .collect()
    }

    fn col_floor(&self, x: i32) -> i64 {
        (x as i64 * self.cols as i64).div_euclid(self.arena.width.max(1) as i64)
    }

    fn col_ceil(&self, x: i32) -> i64 {
        let w = self.arena.width.max(1) as i64;
        (x as i64 * self.cols as i64 + w - 1).div_euclid(w)
    }

    fn row_floor(&self, y: i32) -> i64 {
        (y as i64 * self.rows as i64).div_euclid(self.arena.height.max(1) as i64)
    }

    fn row_ceil(&self, y: i32) -> i64 {
        let h = self.arena.height.max(1) as i64;
        (y as i64 * self.rows as i64 + h - 1).div_euclid(h)
    }

    /// Cell span covered by `rect`, at least one cell wide and tall
    fn span(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let c0 = self.col_floor(rect.left());
        let c1 = self.col_ceil(rect.right()).max(c0 + 1);
        let r0 = self.row_floor(rect.top());
        let r1 = self.row_ceil(rect.bottom()).max(r0 + 1);
        (c0, c1, r0, r1)
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        self.cells
            .get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Write the changed cells to `out`
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let mut style: Option<(Color, Option<Color>)> = None;
        for row in 0..self.rows {
            let mut cursor_ok = false;
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = self.cells[idx];
                let unchanged = self
                    .shown
                    .as_ref()
                    .is_some_and(|shown| shown.get(idx) == Some(&cell));
                if unchanged {
                    cursor_ok = false;
                    continue;
                }

                if !cursor_ok {
                    queue!(out, MoveTo(col, row))?;
                    cursor_ok = true;
                }
                if style != Some((cell.fg, cell.bg)) {
                    queue!(out, SetForegroundColor(term_color(cell.fg)))?;
                    match cell.bg {
                        Some(bg) => queue!(out, SetBackgroundColor(term_color(bg)))?,
                        None => queue!(out, SetBackgroundColor(style::Color::Reset))?,
                    }
                    style = Some((cell.fg, cell.bg));
                }
                queue!(out, Print(cell.ch))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        self.shown = Some(self.cells.clone());
        Ok(())
    }
}

impl Renderer for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (c0, c1, r0, r1) = self.span(&rect);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        ch: ' ',
                        fg: color,
                        bg: Some(color),
                    };
                }
            }
        }
    }

    fn draw_text(&mut self, panel: Rect, text: &str, color: Color) {
        let (c0, c1, r0, r1) = self.span(&panel);
        for (line_no, line) in text.lines().enumerate() {
            let row = r0 + line_no as i64;
            if row >= r1 {
                break;
            }
            for (i, ch) in line.chars().enumerate() {
                let col = c0 + 1 + i as i64;
                if col >= c1 {
                    break;
                }
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ch;
                    cell.fg = color;
                }
            }
        }
    }
}
