use super::Searcher;
use qradar_core::model::coord::Coord;
use rand::{Rng, RngCore};

/// Uniform-random search without replacement.
///
/// Draws coordinates uniformly and redraws on collision with an
/// already-probed cell (rejection sampling). Selection marks the cell
/// visited, so each cell is yielded at most once and `next_probe` returns
/// `None` after `height * width` probes.
#[derive(Debug, Clone)]
pub struct ClassicalSearcher {
    height: usize,
    width: usize,
    visited: Vec<bool>,
    remaining: usize,
}

impl ClassicalSearcher {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            visited: vec![false; height * width],
            remaining: height * width,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Searcher for ClassicalSearcher {
    fn next_probe(&mut self, rng: &mut dyn RngCore) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            let coord = Coord::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            let idx = coord.index(self.width);
            if !self.visited[idx] {
                self.visited[idx] = true;
                self.remaining -= 1;
                return Some(coord);
            }
        }
    }

    fn record(&mut self, _coord: Coord, _hit: bool) {}

    fn name(&self) -> &'static str {
        "classical"
    }
}
