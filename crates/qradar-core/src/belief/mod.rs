//! Belief distribution over grid cells for the probability-guided searcher.
//!
//! The grid starts uniform, and after every probe applies the illumination
//! update: a hit adds a fixed boost to the clipped 3x3 neighborhood of the
//! probed cell (center included), the probed cell is then pinned at zero,
//! and the whole grid is renormalized to sum to 1. Probed cells stay at
//! zero permanently; later neighborhood boosts skip them, so no cell is
//! ever selected twice. Once every cell has been probed the mass is
//! exhausted and stays at zero.

use crate::model::coord::Coord;

#[derive(Debug, Clone, PartialEq)]
pub struct BeliefGrid {
    height: usize,
    width: usize,
    weights: Vec<f64>,
    probed: Vec<bool>,
}

impl BeliefGrid {
    /// Uniform prior: `1 / (height * width)` per cell.
    pub fn uniform(height: usize, width: usize) -> Self {
        let cells = height * width;
        let weight = 1.0 / cells as f64;
        Self {
            height,
            width,
            weights: vec![weight; cells],
            probed: vec![false; cells],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn weight(&self, coord: Coord) -> f64 {
        self.weights[coord.index(self.width)]
    }

    pub fn is_probed(&self, coord: Coord) -> bool {
        self.probed[coord.index(self.width)]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Every cell has been probed and no mass remains.
    pub fn is_exhausted(&self) -> bool {
        self.probed.iter().all(|probed| *probed)
    }

    /// Highest-weight cell, ties broken by first occurrence in row-major
    /// scan order so runs are reproducible for a given seed. `None` once
    /// the mass is exhausted.
    pub fn argmax(&self) -> Option<Coord> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, weight) in self.weights.iter().enumerate() {
            if self.probed[idx] {
                continue;
            }
            match best {
                Some((_, top)) if *weight <= top => {}
                _ => best = Some((idx, *weight)),
            }
        }

        best.map(|(idx, _)| Coord::new(idx / self.width, idx % self.width))
    }

    /// Applies the full post-probe update: neighborhood boost on a hit,
    /// pin the probed cell at zero, renormalize.
    pub fn observe(&mut self, coord: Coord, hit: bool, boost: f64) {
        if hit {
            self.boost_neighborhood(coord, boost);
        }
        self.clear(coord);
        self.renormalize();
    }

    /// Adds `amount` to every unprobed cell in the clipped 3x3 neighborhood
    /// of `center`. The center is included when it has not been probed yet,
    /// which is the case for the cell currently under observation.
    pub fn boost_neighborhood(&mut self, center: Coord, amount: f64) {
        for cell in center.neighborhood(self.height, self.width) {
            let idx = cell.index(self.width);
            if !self.probed[idx] {
                self.weights[idx] += amount;
            }
        }
    }

    /// Pins a probed cell at zero so it is never selected again.
    pub fn clear(&mut self, coord: Coord) {
        let idx = coord.index(self.width);
        self.weights[idx] = 0.0;
        self.probed[idx] = true;
    }

    /// Rescales the grid to sum to 1. A fully-exhausted grid stays at zero.
    pub fn renormalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in &mut self.weights {
                *weight /= total;
            }
        }
    }
}
