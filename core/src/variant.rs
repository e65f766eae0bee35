// SPDX-License-Identifier: MIT OR Apache-2.0

//! Variant configuration and per-variant policy
//!
//! One engine serves every variant; the differences (turn enforcement,
//! color cardinality, capture crediting, mines, drones) live here as data
//! fixed at game creation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{MAX_COLORS, MAX_DIM, MIN_DIM};
use crate::state::GameState;
use crate::ColorId;

/// Where the stones removed by a capture go.
///
/// These are materially different game economies, both observed in
/// production variants; neither is a typo for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditPolicy {
    /// Credit the capturing color's `captured` counter (classic and
    /// N-player rectangular modes)
    CreditCaptor,
    /// Return captured stones to their own color's pot for replenishment
    /// (four-color mode)
    ReturnToOwner,
}

/// Whether out-of-turn placements are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPolicy {
    /// Reject placements by any color other than the one whose turn it is
    Enforced,
    /// Shared/trusted board: anyone may act at any time
    Trusted,
}

/// Mine feature settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MineConfig {
    /// Fraction of cells armed at creation
    pub density: f64,
}

/// Immutable per-game rule configuration, fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Board width, 3..=20
    pub width: u8,
    /// Board height, 3..=20
    pub height: u8,
    /// Number of stone colors, 2..=8
    pub color_count: u8,
    /// Number of players, 2..=8
    pub player_count: u8,
    /// Out-of-turn handling
    pub turn_policy: TurnPolicy,
    /// Capture economy
    pub credit_policy: CreditPolicy,
    /// Three players rotating through two shared colors
    pub shared_colors: bool,
    /// Hidden trap cells, if enabled
    pub mines: Option<MineConfig>,
    /// Probability of a drone strike after each successful place/move;
    /// 0.0 disables the feature
    pub drone_probability: f64,
    /// Initial pot allocation per color
    pub pot_per_color: u16,
}

/// Rejected variant configurations at game creation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimension {0} outside {MIN_DIM}..={MAX_DIM}")]
    BadDimension(u8),
    #[error("color count {0} outside 2..={MAX_COLORS}")]
    BadColorCount(u8),
    #[error("player count {0} outside 2..=8")]
    BadPlayerCount(u8),
    #[error("shared-color rotation requires 3 players over 2 colors")]
    BadSharedRotation,
    #[error("mine density must be within (0, 1)")]
    BadMineDensity,
    #[error("drone probability must be within [0, 1)")]
    BadDroneProbability,
}

impl VariantConfig {
    fn base(width: u8, height: u8, colors: u8, players: u8) -> Self {
        let area = width as u32 * height as u32;
        let pot = (area + colors as u32 - 1) / colors as u32;
        Self {
            width,
            height,
            color_count: colors,
            player_count: players,
            turn_policy: TurnPolicy::Enforced,
            credit_policy: CreditPolicy::CreditCaptor,
            shared_colors: false,
            mines: None,
            drone_probability: 0.0,
            pot_per_color: pot as u16,
        }
    }

    /// Classic 2-player mode on a square board
    pub fn classic(size: u8) -> Self {
        Self::base(size, size, 2, 2)
    }

    /// 4-color mode: captured stones replenish their owner's pot
    pub fn four_color(size: u8) -> Self {
        Self {
            credit_policy: CreditPolicy::ReturnToOwner,
            ..Self::base(size, size, 4, 4)
        }
    }

    /// Rectangular mode with one owned color per player, 2..=8 players
    pub fn rectangular(width: u8, height: u8, players: u8) -> Self {
        Self::base(width, height, players, players)
    }

    /// Three players rotating through two shared colors
    pub fn three_player_shared(size: u8) -> Self {
        Self {
            shared_colors: true,
            ..Self::base(size, size, 2, 3)
        }
    }

    /// Trusted shared board with hidden mines and drone strikes
    pub fn minefield(size: u8) -> Self {
        Self {
            turn_policy: TurnPolicy::Trusted,
            mines: Some(MineConfig { density: 0.10 }),
            drone_probability: 0.10,
            ..Self::base(size, size, 2, 2)
        }
    }

    /// Validate the configuration; called once at game creation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dim in [self.width, self.height] {
            if !(MIN_DIM..=MAX_DIM).contains(&dim) {
                return Err(ConfigError::BadDimension(dim));
            }
        }
        if !(2..=MAX_COLORS).contains(&self.color_count) {
            return Err(ConfigError::BadColorCount(self.color_count));
        }
        if !(2..=8).contains(&self.player_count) {
            return Err(ConfigError::BadPlayerCount(self.player_count));
        }
        if self.shared_colors && (self.player_count != 3 || self.color_count != 2) {
            return Err(ConfigError::BadSharedRotation);
        }
        if let Some(mines) = &self.mines {
            if !(mines.density > 0.0 && mines.density < 1.0) {
                return Err(ConfigError::BadMineDensity);
            }
        }
        if !(0.0..1.0).contains(&self.drone_probability) {
            return Err(ConfigError::BadDroneProbability);
        }
        Ok(())
    }

    /// Color expected to act for the state's current rotation position.
    ///
    /// With shared colors the color alternates per placement independently
    /// of the 3-player turn index; otherwise each player owns the color
    /// matching their turn index.
    pub fn expected_color(&self, state: &GameState) -> ColorId {
        if self.shared_colors {
            ColorId((state.placements % self.color_count as u32) as u8)
        } else {
            ColorId((state.placements % self.player_count as u32) as u8)
        }
    }

    /// Player credited for a capture made by the placement that advanced
    /// the rotation to `turn_index_after`: the player who just moved, not
    /// the player about to move.
    pub fn credited_player(&self, turn_index_after: u8) -> u8 {
        (turn_index_after + self.color_count) % self.player_count
    }

    /// Number of armed cells for a fresh board
    pub fn mine_count(&self) -> usize {
        match &self.mines {
            Some(mines) => {
                let area = self.width as f64 * self.height as f64;
                (area * mines.density).floor() as usize
            }
            None => 0,
        }
    }
}
