// SPDX-License-Identifier: MIT OR Apache-2.0

//! External representation of derived game state
//!
//! This is the only shape handed to read APIs. Mine positions are part of
//! the hidden game record and must never appear here, in any form.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, StonePot};
use crate::variant::VariantConfig;
use crate::Coord;

/// Externally-readable snapshot of a game's derived state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// Board width in cells
    pub width: u8,
    /// Board height in cells
    pub height: u8,
    /// Row-major cells; `None` is empty, `Some(id)` a stone color
    pub rows: Vec<Vec<Option<u8>>>,
    /// Per-color pots, indexed by color id
    pub pots: Vec<StonePot>,
    /// Per-player capture credits (shared-color rotation)
    pub player_credits: Vec<u16>,
    /// Index of the player expected to act next
    pub turn_index: u8,
    /// Color expected to act next
    pub expected_color: u8,
    /// Number of player actions applied so far
    pub move_number: u32,
    /// Most recent place/move position
    pub last_move: Option<Coord>,
    /// Active ko point, if any
    pub ko_point: Option<Coord>,
}

impl GameView {
    /// Project a derived state for external readers.
    pub fn from_state(config: &VariantConfig, state: &GameState) -> Self {
        let rows = (0..config.height)
            .map(|y| {
                (0..config.width)
                    .map(|x| state.board.get(Coord::new(x, y)).map(|c| c.0))
                    .collect()
            })
            .collect();

        Self {
            width: config.width,
            height: config.height,
            rows,
            pots: state.pots.clone(),
            player_credits: state.player_credits.clone(),
            turn_index: state.turn_index(config),
            expected_color: config.expected_color(state).0,
            move_number: state.move_number,
            last_move: state.last_move,
            ko_point: state.ko_point,
        }
    }

    /// Serialize for the wire; returns Null on the (unreachable) failure
    /// path rather than panicking.
    pub fn to_json(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("failed to serialize game view: {}", err);
                serde_json::Value::Null
            }
        }
    }
}
