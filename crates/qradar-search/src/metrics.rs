use qradar_core::model::board::Board;
use qradar_core::model::detection::{DetectionGrid, Reading};

/// Fraction of true targets whose recorded reading is a hit.
///
/// With zero targets there is nothing to find, so accuracy is defined as
/// the vacuous `1.0`. Always lies in `[0, 1]`.
pub fn accuracy(board: &Board, detections: &DetectionGrid) -> f64 {
    if board.num_targets() == 0 {
        return 1.0;
    }

    let found = board
        .target_cells()
        .into_iter()
        .filter(|coord| detections.reading(*coord) == Reading::Hit)
        .count();
    found as f64 / board.num_targets() as f64
}

#[cfg(test)]
mod tests {
    use super::accuracy;
    use qradar_core::model::board::Board;
    use qradar_core::model::coord::Coord;
    use qradar_core::model::detection::DetectionGrid;

    #[test]
    fn zero_targets_is_vacuously_perfect() {
        let board = Board::from_targets(3, 3, &[]).unwrap();
        let detections = DetectionGrid::new(3, 3);
        assert_eq!(accuracy(&board, &detections), 1.0);
    }

    #[test]
    fn counts_only_targets_recorded_as_hits() {
        let targets = [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)];
        let board = Board::from_targets(3, 3, &targets).unwrap();

        let mut detections = DetectionGrid::new(3, 3);
        detections.record(Coord::new(0, 0), true);
        detections.record(Coord::new(1, 1), false); // false negative
        detections.record(Coord::new(0, 2), true); // false positive, not a target

        let value = accuracy(&board, &detections);
        assert!((value - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_targets_hit_is_exactly_one() {
        let targets = [Coord::new(0, 1), Coord::new(1, 0)];
        let board = Board::from_targets(2, 2, &targets).unwrap();

        let mut detections = DetectionGrid::new(2, 2);
        for coord in targets {
            detections.record(coord, true);
        }
        assert_eq!(accuracy(&board, &detections), 1.0);
    }

    #[test]
    fn unprobed_board_scores_zero() {
        let board = Board::from_targets(2, 2, &[Coord::new(0, 0)]).unwrap();
        let detections = DetectionGrid::new(2, 2);
        assert_eq!(accuracy(&board, &detections), 0.0);
    }
}
