use crate::model::board::Board;
use crate::model::coord::Coord;

/// Binary sensor with asymmetric noise. Each observation draws one
/// independent Bernoulli sample; the sensor keeps no memory between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoisySensor {
    false_positive: f64,
    false_negative: f64,
}

impl NoisySensor {
    /// Rates are clamped into [0, 1]; out-of-range inputs are a caller
    /// configuration error caught by `RunConfig::validate`.
    pub fn new(false_positive: f64, false_negative: f64) -> Self {
        Self {
            false_positive: false_positive.clamp(0.0, 1.0),
            false_negative: false_negative.clamp(0.0, 1.0),
        }
    }

    pub const fn noiseless() -> Self {
        Self {
            false_positive: 0.0,
            false_negative: 0.0,
        }
    }

    pub const fn false_positive(&self) -> f64 {
        self.false_positive
    }

    pub const fn false_negative(&self) -> f64 {
        self.false_negative
    }

    /// Observes one cell: an occupied cell reads as a miss with probability
    /// `false_negative`, an empty cell reads as a hit with probability
    /// `false_positive`.
    pub fn observe<R: rand::Rng + ?Sized>(&self, board: &Board, coord: Coord, rng: &mut R) -> bool {
        if board.is_occupied(coord) {
            !rng.gen_bool(self.false_negative)
        } else {
            rng.gen_bool(self.false_positive)
        }
    }
}
