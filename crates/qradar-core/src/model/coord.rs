use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat row-major index of this coordinate within a grid of the given width.
    pub const fn index(self, width: usize) -> usize {
        self.row * width + self.col
    }

    pub const fn in_bounds(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// The 3x3 neighborhood centered on this cell, clipped at grid edges.
    /// Includes the center cell itself. Yields coordinates in row-major order.
    pub fn neighborhood(self, height: usize, width: usize) -> impl Iterator<Item = Coord> {
        let row_start = self.row.saturating_sub(1);
        let row_end = (self.row + 1).min(height.saturating_sub(1));
        let col_start = self.col.saturating_sub(1);
        let col_end = (self.col + 1).min(width.saturating_sub(1));

        (row_start..=row_end)
            .flat_map(move |row| (col_start..=col_end).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
