//! Saving and restoring a game in progress.
//!
//! A `GameSnapshot` captures everything needed to continue a game exactly:
//! board, turn, move history and the RNG position, so a restored game blocks
//! the same squares the original would have. Snapshots are encoded with
//! `bincode`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::board_engine::BoardEngine;
use crate::core::{Board, GameConfig, GameRng, GameRngState, MoveRecord, Player, Square};
use crate::error::{GameError, StoreError};

/// Serializable engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub board: Board,
    pub current_player: Player,
    pub rng: GameRngState,
    pub history: Vector<MoveRecord>,
}

impl BoardEngine {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            board: self.board.clone(),
            current_player: self.current_player,
            rng: self.rng.state(),
            history: self.history.clone(),
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// Rejects snapshots whose board does not match the configuration or
    /// does not hold exactly one token per player.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameError> {
        snapshot.config.validate()?;
        let board = &snapshot.board;
        if board.rows() != snapshot.config.rows || board.cols() != snapshot.config.cols {
            return Err(GameError::InvalidConfig(format!(
                "board is {}x{} but configuration says {}x{}",
                board.rows(),
                board.cols(),
                snapshot.config.rows,
                snapshot.config.cols
            )));
        }
        for token in [Square::TokenA, Square::TokenB] {
            let count = board.count(token);
            if count != 1 {
                return Err(GameError::InvalidConfig(format!(
                    "expected one {token:?} on the board, found {count}"
                )));
            }
        }

        Ok(Self {
            rng: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
            board: snapshot.board,
            current_player: snapshot.current_player,
            history: snapshot.history,
        })
    }

    /// Encode the current state to `writer`.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        bincode::serialize_into(writer, &self.snapshot())?;
        Ok(())
    }

    /// Decode an engine from `reader`.
    pub fn load<R: Read>(reader: R) -> Result<Self, StoreError> {
        let snapshot: GameSnapshot = bincode::deserialize_from(reader)?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Save to a file, replacing it.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| StoreError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "Saved game");
        Ok(())
    }

    /// Load from a file written by `save_file`.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let engine = Self::load(BufReader::new(file))?;
        info!(path = %path.display(), "Loaded game");
        Ok(engine)
    }
}
