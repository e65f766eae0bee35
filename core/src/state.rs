// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived game state: board, pots, rotation counters, ko point
//!
//! Everything in [`GameState`] is a cache derivable from the action log by
//! replay; the log is the sole source of truth.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::effects::MineField;
use crate::variant::VariantConfig;
use crate::{ColorId, Coord};

/// Per-color stone accounting.
///
/// For variants with fixed initial allocations,
/// `pot + on_board + stones captured by opponents` equals the initial
/// allocation at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StonePot {
    /// Stones available to place
    pub pot: u16,
    /// Opponent stones this color has captured (Japanese-style credit)
    pub captured: u16,
    /// This color's stones currently on the board (Chinese-style count)
    pub on_board: u16,
}

impl StonePot {
    fn new(allocation: u16) -> Self {
        Self {
            pot: allocation,
            captured: 0,
            on_board: 0,
        }
    }
}

/// Derived state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current board
    pub board: Board,
    /// Per-color pots, indexed by color id
    pub pots: Vec<StonePot>,
    /// Per-player capture credits, used by the shared-color rotation
    pub player_credits: Vec<u16>,
    /// Hidden trap cells still armed; empty when mines are disabled.
    /// Never exposed through [`crate::view::GameView`].
    pub mines: MineField,
    /// Count of applied place/move player actions; drives turn and color
    /// rotation
    pub placements: u32,
    /// Count of all applied player actions (log numbering)
    pub move_number: u32,
    /// Position of the most recent place/move
    pub last_move: Option<Coord>,
    /// Forbidden target for exactly the next action, if a one-stone capture
    /// just occurred
    pub ko_point: Option<Coord>,
}

impl GameState {
    /// Fresh state for a configured variant: empty board, fully stocked
    /// pots, the mine set fixed at creation.
    pub fn new(config: &VariantConfig, mines: MineField) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            pots: (0..config.color_count)
                .map(|_| StonePot::new(config.pot_per_color))
                .collect(),
            player_credits: vec![0; config.player_count as usize],
            mines,
            placements: 0,
            move_number: 0,
            last_move: None,
            ko_point: None,
        }
    }

    /// Turn index of the player expected to act next
    pub fn turn_index(&self, config: &VariantConfig) -> u8 {
        (self.placements % config.player_count as u32) as u8
    }

    /// Pot for a color id; panics only on ids outside the configured range
    pub fn pot(&self, color: ColorId) -> &StonePot {
        &self.pots[color.index()]
    }

    pub(crate) fn pot_mut(&mut self, color: ColorId) -> &mut StonePot {
        &mut self.pots[color.index()]
    }
}
