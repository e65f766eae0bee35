// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage collaborator seam and the in-memory reference store
//!
//! Records are encoded to CBOR at the storage boundary, so the in-memory
//! store exercises the same codec path a persistent backend would.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use goban_core::action::Action;

use crate::{GameId, GameRecord};

/// Storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("game not found")]
    NotFound,
    /// The record changed under the caller; reload and retry
    #[error("version conflict")]
    VersionConflict,
    #[error("codec failure: {0}")]
    Codec(String),
}

/// Storage collaborator for game records.
///
/// `update` is the serialization point for concurrent mutation: it compares
/// the stored record's version against `expected_version` and rejects the
/// write atomically on mismatch. Appending actions and deleting the most
/// recent ones both travel through it as part of the versioned record.
pub trait GameStore: Send + Sync {
    fn insert(&self, record: &GameRecord) -> Result<(), StoreError>;

    fn load(&self, id: GameId) -> Result<GameRecord, StoreError>;

    /// Atomic update guarded by the optimistic version token.
    /// `record.version` must already be the post-update value.
    fn update(&self, record: &GameRecord, expected_version: u64) -> Result<(), StoreError>;

    /// Ordered action log, for replay and spectator consumers
    fn actions(&self, id: GameId) -> Result<Vec<Action>, StoreError>;

    /// Drop a record (external retention policy)
    fn delete(&self, id: GameId) -> Result<(), StoreError>;
}

fn encode(record: &GameRecord) -> Result<Vec<u8>, StoreError> {
    serde_cbor::to_vec(record).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<GameRecord, StoreError> {
    serde_cbor::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}

/// In-memory store over CBOR-encoded records.
#[derive(Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn insert(&self, record: &GameRecord) -> Result<(), StoreError> {
        let bytes = encode(record)?;
        self.games.write().insert(record.id, bytes);
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<GameRecord, StoreError> {
        let games = self.games.read();
        let bytes = games.get(&id).ok_or(StoreError::NotFound)?;
        decode(bytes)
    }

    fn update(&self, record: &GameRecord, expected_version: u64) -> Result<(), StoreError> {
        let bytes = encode(record)?;
        let mut games = self.games.write();
        let stored = games.get(&record.id).ok_or(StoreError::NotFound)?;
        let current = decode(stored)?;
        if current.version != expected_version {
            tracing::debug!(
                game = %record.id,
                stored = current.version,
                expected = expected_version,
                "rejected stale write"
            );
            return Err(StoreError::VersionConflict);
        }
        games.insert(record.id, bytes);
        Ok(())
    }

    fn actions(&self, id: GameId) -> Result<Vec<Action>, StoreError> {
        Ok(self.load(id)?.log)
    }

    fn delete(&self, id: GameId) -> Result<(), StoreError> {
        self.games
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

impl From<StoreError> for crate::ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => crate::ServiceError::GameNotFound,
            StoreError::VersionConflict => crate::ServiceError::VersionConflict,
            StoreError::Codec(msg) => crate::ServiceError::Codec(msg),
        }
    }
}
