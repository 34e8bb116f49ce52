use crate::model::coord::Coord;
use serde::{Deserialize, Serialize};

/// Recorded sensor reading for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reading {
    Unknown,
    Miss,
    Hit,
}

/// Per-searcher record of observed readings. Each cell is written at most
/// once per run; the searchers' no-reselection rules uphold that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionGrid {
    height: usize,
    width: usize,
    cells: Vec<Reading>,
    hits: usize,
    probed: usize,
}

impl DetectionGrid {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Reading::Unknown; height * width],
            hits: 0,
            probed: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn reading(&self, coord: Coord) -> Reading {
        self.cells[coord.index(self.width)]
    }

    pub fn is_probed(&self, coord: Coord) -> bool {
        self.reading(coord) != Reading::Unknown
    }

    /// Number of cells recorded as hits so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of cells probed so far.
    pub fn probed(&self) -> usize {
        self.probed
    }

    pub fn is_exhausted(&self) -> bool {
        self.probed == self.cells.len()
    }

    /// Writes a reading. Overwriting a probed cell is a caller bug.
    pub fn record(&mut self, coord: Coord, hit: bool) {
        let slot = &mut self.cells[coord.index(self.width)];
        debug_assert_eq!(*slot, Reading::Unknown, "cell probed twice: {coord}");
        *slot = if hit { Reading::Hit } else { Reading::Miss };
        self.probed += 1;
        if hit {
            self.hits += 1;
        }
    }
}
