use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{trace, warn};
use twenty48::{Snapshot, SnapshotStore};

const SNAPSHOT_FILE: &str = "game.json";
const BEST_SCORE_FILE: &str = "best_score.json";

/// Persists the game as JSON files in a directory.
///
/// Files that cannot be parsed are logged and treated as missing, so a
/// corrupted save never prevents a new game from starting.
pub struct JsonStore {
    directory: PathBuf,
}

impl JsonStore {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { directory })
    }

    /// Reads a file from the directory, or returns `None` if it does not exist.
    fn read(&self, file_name: &str) -> anyhow::Result<Option<String>> {
        match fs::read_to_string(self.directory.join(file_name)) {
            Ok(contents) => {
                trace!(name: "Read file", file = file_name, contents = %contents);
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, file_name: &str, contents: &str) -> anyhow::Result<()> {
        trace!(name: "Write file", file = file_name, contents = %contents);
        fs::write(self.directory.join(file_name), contents)?;
        Ok(())
    }
}

impl SnapshotStore for JsonStore {
    fn load_snapshot(&mut self) -> anyhow::Result<Option<Snapshot>> {
        let Some(json) = self.read(SNAPSHOT_FILE)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(%err, "Saved game is malformed, starting a new one");
                Ok(None)
            }
        }
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.write(SNAPSHOT_FILE, &serde_json::to_string(snapshot)?)
    }

    fn clear_snapshot(&mut self) -> anyhow::Result<()> {
        match fs::remove_file(self.directory.join(SNAPSHOT_FILE)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn load_best_score(&mut self) -> anyhow::Result<u64> {
        let Some(json) = self.read(BEST_SCORE_FILE)? else {
            return Ok(0);
        };
        match serde_json::from_str::<u64>(&json) {
            Ok(best_score) => Ok(best_score),
            Err(err) => {
                warn!(%err, "Saved best score is malformed, resetting it");
                Ok(0)
            }
        }
    }

    fn save_best_score(&mut self, best_score: u64) -> anyhow::Result<()> {
        if best_score > self.load_best_score()? {
            self.write(BEST_SCORE_FILE, &serde_json::to_string(&best_score)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use twenty48::{Board, WinStatus};

    use super::*;

    /// A fresh, empty directory that is unique to one test.
    pub(crate) fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "twenty48-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_directory() {
        let dir = test_dir("missing-directory").join("does-not-exist");
        assert!(JsonStore::new(dir).is_err());
    }

    #[test]
    fn empty_directory() {
        let mut store = JsonStore::new(test_dir("empty-directory")).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), None);
        assert_eq!(store.load_best_score().unwrap(), 0);
        // Clearing a snapshot that does not exist is fine
        store.clear_snapshot().unwrap();
    }

    #[test]
    fn snapshot_round_trip() {
        let mut store = JsonStore::new(test_dir("snapshot-round-trip")).unwrap();
        let snapshot = Snapshot {
            board: Board::EMPTY.with_tile(1, 2, 8),
            score: 12,
            win_status: WinStatus::Won,
        };
        store.save_snapshot(&snapshot).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), Some(snapshot));
        store.clear_snapshot().unwrap();
        assert_eq!(store.load_snapshot().unwrap(), None);
    }

    #[test]
    fn malformed_files_are_ignored() {
        let dir = test_dir("malformed-files");
        fs::write(dir.join(SNAPSHOT_FILE), "{\"board\": [[2, 2]]}").unwrap();
        fs::write(dir.join(BEST_SCORE_FILE), "lots").unwrap();
        let mut store = JsonStore::new(dir).unwrap();
        assert_eq!(store.load_snapshot().unwrap(), None);
        assert_eq!(store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn best_score_only_increases() {
        let mut store = JsonStore::new(test_dir("best-score")).unwrap();
        store.save_best_score(100).unwrap();
        store.save_best_score(40).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 100);
        store.save_best_score(140).unwrap();
        store.clear_snapshot().unwrap();
        assert_eq!(store.load_best_score().unwrap(), 140);
    }
}
