#![forbid(unsafe_code)]

//! Character-grid render target.
//!
//! A [`Frame`] is a fixed-size grid of cells plus a hit grid. Each cell
//! holds one grapheme; a wide grapheme occupies its own cell and marks the
//! following cells as continuations. Widgets register hit regions with an
//! opaque `u64` payload so that a click can be mapped back to the item that
//! drew there.

/// An axis-aligned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin.
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Grapheme(String),
    /// Trailing cell of a wide grapheme.
    Continuation,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Grapheme(" ".to_string())
    }
}

/// Render target for widgets.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    hits: Vec<Option<u64>>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            hits: vec![None; len],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Write one grapheme of display width `width` at `(x, y)`.
    ///
    /// Out-of-bounds writes are ignored. Continuation cells past the right
    /// edge are dropped.
    pub fn set(&mut self, x: u16, y: u16, grapheme: &str, width: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        self.cells[idx] = Cell::Grapheme(grapheme.to_string());
        for dx in 1..width {
            if let Some(cont) = self.index(x.saturating_add(dx), y) {
                self.cells[cont] = Cell::Continuation;
            }
        }
    }

    /// The grapheme at `(x, y)`; `None` out of bounds or on a continuation.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&str> {
        match &self.cells[self.index(x, y)?] {
            Cell::Grapheme(g) => Some(g.as_str()),
            Cell::Continuation => None,
        }
    }

    /// Attach `data` to every cell of `rect` (clipped to the frame).
    pub fn register_hit(&mut self, rect: Rect, data: u64) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                if let Some(idx) = self.index(x, y) {
                    self.hits[idx] = Some(data);
                }
            }
        }
    }

    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<u64> {
        self.hits[self.index(x, y)?]
    }

    /// Row `y` as text, with trailing spaces kept.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(g) = self.get(x, y) {
                out.push_str(g);
            }
        }
        out
    }

    /// Whole frame as text, one line per row, trailing spaces trimmed.
    #[must_use]
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_within_bounds() {
        let mut frame = Frame::new(3, 2);
        frame.set(1, 1, "x", 1);
        assert_eq!(frame.get(1, 1), Some("x"));
        assert_eq!(frame.get(0, 0), Some(" "));
        assert_eq!(frame.get(3, 0), None);
        frame.set(9, 9, "y", 1);
        assert_eq!(frame.to_text(), "\n x");
    }

    #[test]
    fn wide_grapheme_marks_continuation() {
        let mut frame = Frame::new(4, 1);
        frame.set(0, 0, "你", 2);
        frame.set(2, 0, "a", 1);
        assert_eq!(frame.get(1, 0), None);
        assert_eq!(frame.row_text(0), "你a ");
    }

    #[test]
    fn hit_regions_are_clipped() {
        let mut frame = Frame::new(4, 2);
        frame.register_hit(Rect::new(2, 1, 10, 10), 7);
        assert_eq!(frame.hit_test(3, 1), Some(7));
        assert_eq!(frame.hit_test(1, 1), None);
        assert_eq!(frame.hit_test(4, 1), None);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert!(r.contains(2, 3));
        assert!(!r.contains(6, 3));
        assert!(Rect::new(0, 0, 0, 3).is_empty());
    }
}
