// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Service - Game Records and the Apply/Undo Loop
//!
//! This crate wraps the rule engine with everything a shared-URL deployment
//! needs around it:
//! - Game records keyed by id, with the action log as source of truth
//! - Storage and identity collaborator traits
//! - Optimistic-version serialization of concurrent mutations per game
//! - TTL-bound rate limiting and JSON boundary validation

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod request;
pub mod service;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use goban_core::action::Action;
use goban_core::effects::MineField;
use goban_core::state::GameState;
use goban_core::variant::VariantConfig;
use goban_core::view::GameView;

pub use error::ServiceError;
pub use service::GameService;

/// Opaque identifier for one shared board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One stored game.
///
/// `log` is the sole source of truth; `state` is a cache reconstructible by
/// replay from `config` + `initial_mines` + `log`. `initial_mines` and the
/// armed set inside `state` are hidden record fields and never reach views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub config: VariantConfig,
    pub initial_mines: MineField,
    pub log: Vec<Action>,
    pub state: GameState,
    /// Optimistic concurrency token, bumped on every successful mutation
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// External projection of the cached state
    pub fn view(&self) -> GameView {
        GameView::from_state(&self.config, &self.state)
    }
}
