use super::Searcher;
use qradar_core::belief::BeliefGrid;
use qradar_core::model::config::RunConfig;
use qradar_core::model::coord::Coord;
use rand::RngCore;

/// Belief-guided ("quantum-inspired") search.
///
/// Greedily probes the highest-belief cell; a hit boosts the belief of the
/// surrounding neighborhood before the probed cell is zeroed, steering
/// subsequent probes toward cells near confirmed detections. Draws no
/// randomness of its own — probe order is fully determined by the belief
/// grid and its row-major tie-break.
#[derive(Debug, Clone)]
pub struct GuidedSearcher {
    belief: BeliefGrid,
    boost: f64,
}

impl GuidedSearcher {
    pub fn new(height: usize, width: usize, boost: f64) -> Self {
        Self {
            belief: BeliefGrid::uniform(height, width),
            boost,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.height, config.width, config.boost)
    }

    pub fn belief(&self) -> &BeliefGrid {
        &self.belief
    }
}

impl Searcher for GuidedSearcher {
    fn next_probe(&mut self, _rng: &mut dyn RngCore) -> Option<Coord> {
        self.belief.argmax()
    }

    fn record(&mut self, coord: Coord, hit: bool) {
        self.belief.observe(coord, hit, self.boost);
    }

    fn name(&self) -> &'static str {
        "guided"
    }
}
