use super::session::DuelSession;
use crate::model::config::{ConfigError, RunConfig};
use crate::model::coord::Coord;
use serde::{Deserialize, Serialize};

/// Serializable capture of a duel session.
///
/// A session is fully determined by its seed, configuration, and the
/// ordered list of accepted manual probes, so the snapshot stores only
/// those and replays them on restore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuelSnapshot {
    pub seed: u64,
    pub config: RunConfig,
    pub manual_probes: Vec<Coord>,
}

impl DuelSnapshot {
    pub fn capture(session: &DuelSession) -> Self {
        DuelSnapshot {
            seed: session.seed(),
            config: *session.config(),
            manual_probes: session.manual_history().to_vec(),
        }
    }

    pub fn restore(self) -> Result<DuelSession, ConfigError> {
        let mut session = DuelSession::with_seed(self.config, self.seed)?;
        for coord in self.manual_probes {
            session.play_turn(coord);
        }
        Ok(session)
    }

    pub fn to_json(session: &DuelSession) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::DuelSnapshot;
    use crate::game::session::DuelSession;
    use crate::model::config::RunConfig;
    use crate::model::coord::Coord;

    fn session_after_three_turns() -> DuelSession {
        let config = RunConfig::new(4, 4, 3).with_noise(0.1, 0.1);
        let mut session = DuelSession::with_seed(config, 77).unwrap();
        for coord in [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)] {
            session.play_turn(coord);
        }
        session
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let session = session_after_three_turns();
        let json = DuelSnapshot::to_json(&session).unwrap();
        assert!(json.contains("\"seed\": 77"));
        assert!(json.contains("\"manual_probes\""));
    }

    #[test]
    fn snapshot_roundtrip_restores_the_session() {
        let session = session_after_three_turns();
        let snapshot = DuelSnapshot::capture(&session);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = DuelSnapshot::from_json(&json).unwrap().restore().unwrap();

        assert_eq!(restored.seed(), session.seed());
        assert_eq!(restored.turn(), session.turn());
        assert_eq!(restored.board(), session.board());
        assert_eq!(restored.manual_detections(), session.manual_detections());
        assert_eq!(restored.radar_detections(), session.radar_detections());
        assert_eq!(restored.belief(), session.belief());
    }

    #[test]
    fn restore_rejects_invalid_config() {
        let snapshot = DuelSnapshot {
            seed: 1,
            config: RunConfig::new(2, 2, 99),
            manual_probes: Vec::new(),
        };
        assert!(snapshot.restore().is_err());
    }
}
