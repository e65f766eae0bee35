// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered action log entries
//!
//! The append-only log is the sole durable source of truth for a game;
//! every other field on a game record is a cache derivable from it.

use serde::{Deserialize, Serialize};

use crate::effects::EffectRecord;
use crate::{ColorId, Coord};

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOrigin {
    /// A player's own request
    Player,
    /// Auto-generated maintenance entry (drone strike removal); undo strips
    /// these together with the player entry they trail
    Maintenance,
}

/// What the entry does to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Place a stone from the pot
    Place { pos: Coord, color: ColorId },
    /// Relocate a stone already on the board
    Move { from: Coord, to: Coord, color: ColorId },
    /// Take a stone off the board
    Remove { pos: Coord },
}

/// One fully resolved log entry.
///
/// Effect payloads are resolved before the entry is appended, so applying
/// the entry is deterministic - replay never re-rolls randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// 1-based number of the player move this entry belongs to; maintenance
    /// entries share the number of the move that produced them
    pub move_number: u32,
    /// Player or maintenance entry
    pub origin: ActionOrigin,
    /// Board mutation
    pub kind: ActionKind,
    /// Resolved special effect, if one fired
    pub effect: Option<EffectRecord>,
    /// Unix seconds when the entry was resolved
    pub ts: i64,
}

impl Action {
    /// Color the entry acts for, when it has one
    pub fn color(&self) -> Option<ColorId> {
        match self.kind {
            ActionKind::Place { color, .. } | ActionKind::Move { color, .. } => Some(color),
            ActionKind::Remove { .. } => match &self.effect {
                Some(EffectRecord::DroneStrike { color, .. }) => Some(*color),
                _ => None,
            },
        }
    }
}
