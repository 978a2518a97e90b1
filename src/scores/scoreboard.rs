//! Win counts per display name, persisted as JSON.
//!
//! The file holds a single object mapping names to win counts:
//!
//! ```text
//! {"Ada": 3, "Grace": 1}
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Default score file, relative to the working directory.
pub const DEFAULT_SCORES_FILE: &str = "game_results.json";

/// Receives the display name of each game's winner.
pub trait ResultSink {
    /// Credit one win to `winner`.
    fn record_win(&mut self, winner: &str) -> Result<(), StoreError>;
}

/// Win counts keyed by display name, backed by a JSON file.
///
/// Every mutation is written through to the file immediately.
#[derive(Clone, Debug)]
pub struct ScoreBoard {
    path: PathBuf,
    scores: FxHashMap<String, u32>,
}

impl ScoreBoard {
    /// Open the score file at `path`.
    ///
    /// A missing file yields an empty board; the file is created on the
    /// first save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        info!(path = %path.display(), "Loading scores");

        let scores = if path.exists() {
            let file = File::open(&path).map_err(|source| StoreError::File {
                path: path.clone(),
                source,
            })?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            warn!(path = %path.display(), "Scores file not found, starting empty");
            FxHashMap::default()
        };

        Ok(Self { path, scores })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all scores to the backing file, replacing it.
    pub fn save(&self) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|source| StoreError::File {
            path: self.path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.scores)?;
        writer.flush()?;
        info!(path = %self.path.display(), entries = self.scores.len(), "Saved scores");
        Ok(())
    }

    /// Remove every entry and save.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        info!("Clearing all scores");
        self.scores.clear();
        self.save()
    }

    /// Wins recorded for `name`, 0 if unknown.
    #[must_use]
    pub fn wins(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    /// All entries.
    #[must_use]
    pub fn scores(&self) -> &FxHashMap<String, u32> {
        &self.scores
    }

    /// Entries sorted by wins (most first), ties by name.
    #[must_use]
    pub fn ranking(&self) -> Vec<(&str, u32)> {
        let mut ranking: Vec<_> = self
            .scores
            .iter()
            .map(|(name, &wins)| (name.as_str(), wins))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranking
    }
}

impl ResultSink for ScoreBoard {
    fn record_win(&mut self, winner: &str) -> Result<(), StoreError> {
        let wins = self.scores.entry(winner.to_string()).or_insert(0);
        *wins += 1;
        debug!(winner, wins = *wins, "Score updated");
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let board = ScoreBoard::load(dir.path().join("scores.json")).unwrap();
        assert!(board.scores().is_empty());
        assert_eq!(board.wins("nobody"), 0);
    }

    #[test]
    fn test_record_win_increments() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = ScoreBoard::load(dir.path().join("scores.json")).unwrap();

        board.record_win("Player1").unwrap();
        assert_eq!(board.wins("Player1"), 1);

        board.record_win("Player1").unwrap();
        assert_eq!(board.wins("Player1"), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut board = ScoreBoard::load(&path).unwrap();
        board.record_win("Player2").unwrap();
        board.record_win("Player2").unwrap();

        let reloaded = ScoreBoard::load(&path).unwrap();
        assert_eq!(reloaded.wins("Player2"), 2);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut board = ScoreBoard::load(&path).unwrap();
        board.record_win("Ada").unwrap();
        board.clear().unwrap();

        assert!(board.scores().is_empty());
        assert!(ScoreBoard::load(&path).unwrap().scores().is_empty());
    }

    #[test]
    fn test_ranking_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = ScoreBoard::load(dir.path().join("scores.json")).unwrap();
        for name in ["Bob", "Ada", "Ada", "Cy", "Cy"] {
            board.record_win(name).unwrap();
        }

        assert_eq!(board.ranking(), vec![("Ada", 2), ("Cy", 2), ("Bob", 1)]);
    }

    #[test]
    fn test_reads_plain_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"Grace": 4}"#).unwrap();

        let board = ScoreBoard::load(&path).unwrap();
        assert_eq!(board.wins("Grace"), 4);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(ScoreBoard::load(&path), Err(StoreError::Json(_))));
    }
}
