#![forbid(unsafe_code)]

//! The popup surface: a row-major grid of attribute-flagged cells.
//!
//! This is the render target the menu draws into. Writes are bounds-checked
//! and out-of-range writes are silently dropped, so callers never need to
//! pre-clip. Wide (CJK) glyphs occupy their display width; the cell after a
//! width-2 glyph is cleared so stale content never shows through.

use bitflags::bitflags;
use popmenu_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Presentational attributes for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellAttrs: u8 {
        /// Bold/bright.
        const BOLD      = 0b0001;
        /// Dimmed (used for disabled items and placeholders).
        const DIM       = 0b0010;
        /// Inverted colors (used for the input cursor).
        const REVERSE   = 0b0100;
        /// Underlined (used for IME preedit text).
        const UNDERLINE = 0b1000;
    }
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single cell: one glyph plus attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The glyph in this cell.
    pub ch: char,
    /// Presentational attributes.
    pub attrs: CellAttrs,
}

impl Cell {
    /// Create a cell from a plain character.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            attrs: CellAttrs::empty(),
        }
    }

    /// Set the attributes (builder).
    #[must_use]
    pub const fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

/// A fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create a surface filled with blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full surface area as a rectangle.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at a position, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at a position. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rectangular region with a cell, clipped to the surface.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Write a string starting at `(x, y)`, clipping at `max_x` (exclusive).
    ///
    /// Advances by each grapheme's display width and returns the column after
    /// the last glyph written. A glyph that would straddle `max_x` is not
    /// written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, attrs: CellAttrs, max_x: u16) -> u16 {
        let mut col = x;
        let limit = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            let w = grapheme.width() as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > limit {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            self.set(col, y, Cell::from_char(ch).with_attrs(attrs));
            // Blank out the tail of a wide glyph.
            for tail in 1..w {
                self.set(col + tail, y, Cell::from_char(' ').with_attrs(attrs));
            }
            col += w;
        }
        col
    }

    /// Render a row as a plain string, for tests and the demo.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                out.push(cell.ch);
            }
        }
        out
    }
}
