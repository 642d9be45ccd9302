//! Framebuffer of character cells tagged with color pairs.

use crate::types::{PairIndex, DEFAULT_PAIR};

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub pair: PairIndex,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            pair: DEFAULT_PAIR,
        }
    }
}

/// 2D framebuffer of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Write a string on one row, stopping at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, pair: PairIndex) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, pair });
            cx += 1;
        }
    }

    /// Copy `src` into this buffer with its top-left corner at (`x`, `y`).
    ///
    /// Cells falling outside this buffer are dropped.
    pub fn blit(&mut self, x: u16, y: u16, src: &FrameBuffer) {
        for sy in 0..src.height {
            let Some(dy) = y.checked_add(sy) else { break };
            if dy >= self.height {
                break;
            }
            for sx in 0..src.width {
                let Some(dx) = x.checked_add(sx) else { break };
                if dx >= self.width {
                    break;
                }
                if let Some(cell) = src.get(sx, sy) {
                    self.set(dx, dy, cell);
                }
            }
        }
    }

    /// The characters of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}
