use serde::{Deserialize, Serialize};

use crate::{Board, WinStatus};

/// The persisted part of a [`Session`](crate::Session).
///
/// Serializes as e.g. `{"board":[[2,0,0,0],...],"score":4,"winStatus":"notWon"}`.
/// Deserializing validates the board, so a snapshot with a malformed grid or
/// with cells that are not tiles is rejected. Missing `score` or `winStatus`
/// fields fall back to their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub board: Board,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub win_status: WinStatus,
}

/// Durable storage for sessions.
///
/// The best score is stored separately from the snapshot, because it
/// survives resets.
pub trait SnapshotStore {
    /// Returns `None` if there is no snapshot.
    fn load_snapshot(&mut self) -> anyhow::Result<Option<Snapshot>>;
    fn save_snapshot(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;
    /// Removes the stored snapshot, but not the best score.
    fn clear_snapshot(&mut self) -> anyhow::Result<()>;
    /// Returns 0 if no best score was stored yet.
    fn load_best_score(&mut self) -> anyhow::Result<u64>;
    /// Stores the best score, unless a higher one is already stored.
    fn save_best_score(&mut self, best_score: u64) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn json_format() {
        let snapshot = Snapshot {
            board: board![
                [2, 0, 0, 0],
                [0, 4, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 128],
            ],
            score: 36,
            win_status: WinStatus::Continue,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"board":[[2,0,0,0],[0,4,0,0],[0,0,0,0],[0,0,0,128]],"score":36,"winStatus":"continue"}"#
        );
        assert_eq!(serde_json::from_str::<Snapshot>(&json).unwrap(), snapshot);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let json = r#"{"board":[[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,2,0]]}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.win_status, WinStatus::NotWon);
        assert_eq!(snapshot.board.get(3, 2), Some(2));
    }

    #[test]
    fn rejects_malformed_boards() {
        // Too few rows
        let json = r#"{"board":[[0,0,0,0],[0,0,0,0],[0,0,0,0]],"score":0,"winStatus":"won"}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
        // Row too long
        let json = r#"{"board":[[0,0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
        // Not a tile
        let json = r#"{"board":[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
        // Unknown win status
        let json = r#"{"board":[[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],"winStatus":"lost"}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }
}
