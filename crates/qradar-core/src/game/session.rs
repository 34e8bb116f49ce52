use crate::belief::BeliefGrid;
use crate::model::board::Board;
use crate::model::config::{ConfigError, RunConfig};
use crate::model::coord::Coord;
use crate::model::detection::DetectionGrid;
use crate::model::sensor::NoisySensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One interleaved manual-vs-radar duel on a shared board.
///
/// The caller owns the session and drives it one turn at a time: the manual
/// side fires at a chosen cell, then the radar side immediately takes its
/// own belief-guided probe. The first side whose recorded hits reach the
/// target count wins; the manual side takes ties because its reading is
/// checked first within a turn.
///
/// All randomness flows through a single seeded stream, so a session is
/// fully determined by its seed and the sequence of accepted manual probes.
#[derive(Debug, Clone)]
pub struct DuelSession {
    config: RunConfig,
    board: Board,
    sensor: NoisySensor,
    manual_detections: DetectionGrid,
    radar_detections: DetectionGrid,
    belief: BeliefGrid,
    rng: StdRng,
    seed: u64,
    turn: u32,
    manual_history: Vec<Coord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    ManualWin,
    RadarWin,
}

/// Readings produced by one full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport {
    pub manual: Option<(Coord, bool)>,
    pub radar: Option<(Coord, bool)>,
}

impl DuelSession {
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::generate(config.height, config.width, config.num_targets, &mut rng)?;

        Ok(Self {
            sensor: config.sensor(),
            manual_detections: DetectionGrid::new(config.height, config.width),
            radar_detections: DetectionGrid::new(config.height, config.width),
            belief: BeliefGrid::uniform(config.height, config.width),
            board,
            rng,
            seed,
            turn: 0,
            manual_history: Vec::new(),
            config,
        })
    }

    /// Plays one full turn: the manual probe, then the radar's reply.
    ///
    /// A manual probe at an out-of-bounds or already-probed cell is
    /// rejected, consumes no randomness, and the radar does not move.
    /// After the duel is decided or both sides are exhausted, turns are
    /// no-ops reporting neither reading.
    pub fn play_turn(&mut self, coord: Coord) -> TurnReport {
        let manual = self.fire_manual(coord);
        let radar = if manual.is_some() {
            self.turn += 1;
            self.radar_turn()
        } else {
            None
        };

        TurnReport { manual, radar }
    }

    fn fire_manual(&mut self, coord: Coord) -> Option<(Coord, bool)> {
        if self.outcome().is_some()
            || !coord.in_bounds(self.config.height, self.config.width)
            || self.manual_detections.is_probed(coord)
        {
            return None;
        }

        let hit = self.sensor.observe(&self.board, coord, &mut self.rng);
        self.manual_detections.record(coord, hit);
        self.manual_history.push(coord);
        Some((coord, hit))
    }

    fn radar_turn(&mut self) -> Option<(Coord, bool)> {
        if self.outcome().is_some() {
            return None;
        }

        let coord = self.belief.argmax()?;
        let hit = self.sensor.observe(&self.board, coord, &mut self.rng);
        self.radar_detections.record(coord, hit);
        self.belief.observe(coord, hit, self.config.boost);
        Some((coord, hit))
    }

    /// `None` while the duel is undecided. With zero targets the manual
    /// side wins vacuously before any probe.
    pub fn outcome(&self) -> Option<DuelOutcome> {
        if self.manual_detections.hits() >= self.config.num_targets {
            Some(DuelOutcome::ManualWin)
        } else if self.radar_detections.hits() >= self.config.num_targets {
            Some(DuelOutcome::RadarWin)
        } else {
            None
        }
    }

    /// Decided, or no probes remain for either side (the bounded-termination
    /// fallback when noise never yields enough hits).
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
            || (self.manual_detections.is_exhausted() && self.belief.is_exhausted())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn manual_detections(&self) -> &DetectionGrid {
        &self.manual_detections
    }

    pub fn radar_detections(&self) -> &DetectionGrid {
        &self.radar_detections
    }

    pub fn belief(&self) -> &BeliefGrid {
        &self.belief
    }

    pub fn manual_history(&self) -> &[Coord] {
        &self.manual_history
    }
}
