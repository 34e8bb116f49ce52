use crate::model::config::ConfigError;
use crate::model::coord::Coord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

/// Ground-truth occupancy grid. Exactly `num_targets` cells hold a target,
/// placed without replacement; immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    num_targets: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Places `num_targets` targets on distinct uniformly-random cells.
    pub fn generate<R: rand::Rng + ?Sized>(
        height: usize,
        width: usize,
        num_targets: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let mut board = Self::empty(height, width)?;
        if num_targets > board.cells.len() {
            return Err(ConfigError::TooManyTargets {
                requested: num_targets,
                cells: board.cells.len(),
            });
        }

        for idx in index::sample(rng, board.cells.len(), num_targets) {
            board.cells[idx] = true;
        }
        board.num_targets = num_targets;
        Ok(board)
    }

    pub fn generate_with_seed(
        height: usize,
        width: usize,
        num_targets: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(height, width, num_targets, &mut rng)
    }

    /// Builds a board from an explicit target list (scenario setups and tests).
    pub fn from_targets(
        height: usize,
        width: usize,
        targets: &[Coord],
    ) -> Result<Self, ConfigError> {
        let mut board = Self::empty(height, width)?;
        for coord in targets {
            if !coord.in_bounds(height, width) {
                return Err(ConfigError::TargetOutOfBounds {
                    row: coord.row,
                    col: coord.col,
                });
            }
            let idx = coord.index(width);
            if board.cells[idx] {
                return Err(ConfigError::DuplicateTarget {
                    row: coord.row,
                    col: coord.col,
                });
            }
            board.cells[idx] = true;
        }
        board.num_targets = targets.len();
        Ok(board)
    }

    fn empty(height: usize, width: usize) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyGrid { height, width });
        }
        Ok(Self {
            height,
            width,
            num_targets: 0,
            cells: vec![false; height * width],
        })
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

    pub fn num_targets(&self) -> usize {
        self.num_targets
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cells[coord.index(self.width)]
    }

    /// Target coordinates in row-major order.
    pub fn target_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(idx, _)| Coord::new(idx / self.width, idx % self.width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::model::config::ConfigError;
    use crate::model::coord::Coord;

    #[test]
    fn generated_board_has_exact_target_count() {
        let board = Board::generate_with_seed(6, 4, 7, 99).unwrap();
        assert_eq!(board.target_cells().len(), 7);
        assert_eq!(board.num_targets(), 7);
        assert_eq!(board.cell_count(), 24);
    }

    #[test]
    fn generation_with_seed_is_deterministic() {
        let board_a = Board::generate_with_seed(5, 5, 3, 42).unwrap();
        let board_b = Board::generate_with_seed(5, 5, 3, 42).unwrap();
        assert_eq!(board_a, board_b);
    }

    #[test]
    fn generation_with_different_seeds_differs() {
        let board_a = Board::generate_with_seed(8, 8, 10, 1).unwrap();
        let board_b = Board::generate_with_seed(8, 8, 10, 2).unwrap();
        assert_ne!(board_a, board_b);
    }

    #[test]
    fn full_board_is_all_targets() {
        let board = Board::generate_with_seed(3, 3, 9, 0).unwrap();
        assert!(board.target_cells().len() == 9);
        assert!(board.is_occupied(Coord::new(1, 1)));
    }

    #[test]
    fn rejects_too_many_targets() {
        let err = Board::generate_with_seed(2, 2, 5, 0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyTargets {
                requested: 5,
                cells: 4
            }
        );
    }

    #[test]
    fn rejects_empty_grid() {
        let err = Board::generate_with_seed(0, 4, 0, 0).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyGrid { .. }));
    }

    #[test]
    fn from_targets_places_listed_cells() {
        let targets = [Coord::new(0, 0), Coord::new(2, 2), Coord::new(4, 4)];
        let board = Board::from_targets(5, 5, &targets).unwrap();
        assert_eq!(board.target_cells(), targets.to_vec());
        assert!(!board.is_occupied(Coord::new(1, 1)));
    }

    #[test]
    fn from_targets_rejects_duplicates_and_out_of_bounds() {
        let err = Board::from_targets(3, 3, &[Coord::new(1, 1), Coord::new(1, 1)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTarget { row: 1, col: 1 }));

        let err = Board::from_targets(3, 3, &[Coord::new(3, 0)]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TargetOutOfBounds { row: 3, col: 0 }
        ));
    }
}
