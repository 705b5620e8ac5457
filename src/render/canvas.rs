//! Terminal cell buffer implementing [`Surface`].
//!
//! Logical pixels are scaled onto a grid of character cells. Rectangles set
//! the cell background, text sets the symbol and foreground. The finished
//! grid is turned into ratatui lines, one span per run of equal style.

use super::Surface;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    logical_width: f64,
    logical_height: f64,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, logical_width: f64, logical_height: f64) -> Self {
        Self {
            cols,
            rows,
            logical_width,
            logical_height,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Change the cell grid. Contents are cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells.clear();
        self.cells
            .resize(cols as usize * rows as usize, Cell::default());
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn scale_x(&self) -> f64 {
        if self.logical_width > 0.0 {
            self.cols as f64 / self.logical_width
        } else {
            0.0
        }
    }

    fn scale_y(&self) -> f64 {
        if self.logical_height > 0.0 {
            self.rows as f64 / self.logical_height
        } else {
            0.0
        }
    }

    /// Map a logical span `[start, start + len)` onto cell indices in
    /// `[0, limit)`. Anything with positive length covers at least one cell.
    fn cell_span(start: f64, len: f64, scale: f64, limit: u16) -> Option<(usize, usize)> {
        if len <= 0.0 || limit == 0 {
            return None;
        }
        let first = (start * scale).round();
        let mut last = ((start + len) * scale).round();
        if last <= first {
            last = first + 1.0;
        }
        let first = first.max(0.0).min(limit as f64) as usize;
        let last = last.max(0.0).min(limit as f64) as usize;
        (first < last).then_some((first, last))
    }

    /// One line per row, with adjacent cells of equal style merged.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows as usize);
        for row in self.cells.chunks(self.cols.max(1) as usize) {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut style: Option<(Color, Color)> = None;
            for cell in row {
                let key = (cell.fg, cell.bg);
                if style != Some(key) {
                    if let Some((fg, bg)) = style {
                        spans.push(Span::styled(
                            std::mem::take(&mut run),
                            Style::default().fg(fg).bg(bg),
                        ));
                    }
                    style = Some(key);
                }
                run.push(cell.symbol);
            }
            if let Some((fg, bg)) = style {
                spans.push(Span::styled(run, Style::default().fg(fg).bg(bg)));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self, color: Color) {
        for cell in &mut self.cells {
            *cell = Cell {
                bg: color,
                ..Cell::default()
            };
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let Some((c0, c1)) = Self::cell_span(x, width, self.scale_x(), self.cols) else {
            return;
        };
        let Some((r0, r1)) = Self::cell_span(y, height, self.scale_y(), self.rows) else {
            return;
        };
        let cols = self.cols as usize;
        for row in r0..r1 {
            for cell in &mut self.cells[row * cols + c0..row * cols + c1] {
                *cell = Cell {
                    symbol: ' ',
                    fg: cell.fg,
                    bg: color,
                };
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let row = (y * self.scale_y()).floor();
        if row < 0.0 || row >= self.rows as f64 {
            return;
        }
        let row = row as usize;
        let start = (x * self.scale_x()).round() as i64;
        let cols = self.cols as usize;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 {
                continue;
            }
            if col >= cols as i64 {
                break;
            }
            let cell = &mut self.cells[row * cols + col as usize];
            cell.symbol = ch;
            cell.fg = color;
        }
    }
}
