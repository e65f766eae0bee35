// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Rule Engine for the Shared Board
//!
//! This crate provides the rule-evaluation and state-reconstruction engine
//! shared by every board variant:
//! - Rectangular board representation with up to 8 stone colors
//! - Group/liberty analysis, capture resolution, suicide and ko validation
//! - A variant policy layer (turn order, capture crediting, mines, drones)
//! - An append-only action log and deterministic replay/undo

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod action;
pub mod board;
pub mod capture;
pub mod effects;
pub mod engine;
pub mod groups;
pub mod replay;
pub mod scoring;
pub mod state;
pub mod validate;
pub mod variant;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a stone color on the board.
///
/// Variants use between 2 and 8 colors; color ids are dense starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorId(pub u8);

impl ColorId {
    /// Index into per-color tables (pots, tallies).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Board coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A requested board mutation, before validation and effect resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRequest {
    /// Place a stone from the pot at a position
    Place { pos: Coord, color: ColorId },
    /// Relocate a stone already on the board
    Move { from: Coord, to: Coord, color: ColorId },
    /// Pick a stone up off the board (correction, not a rule action)
    Remove { pos: Coord },
}

/// Errors produced by rule validation.
///
/// Validation is strictly prior to mutation: a rejected request never
/// partially writes state.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    /// The coordinates are outside the board
    #[error("coordinates outside the board")]
    InvalidCoordinates,

    /// The target cell already holds a stone
    #[error("cell is already occupied")]
    CellOccupied,

    /// The cell holds no stone to act on
    #[error("cell is empty")]
    CellEmpty,

    /// The color has no stones left to place
    #[error("no stones left in pot for color {0}")]
    PotExhausted(u8),

    /// The move would leave its own group with zero liberties
    #[error("move is suicide")]
    SuicideMove,

    /// The target is the active ko point
    #[error("immediate recapture forbidden by ko")]
    KoViolation,

    /// It is not this color's turn
    #[error("out of turn")]
    OutOfTurn,

    /// Undo was requested on a log with no player actions
    #[error("no history to undo")]
    NoHistoryToUndo,

    /// Replay was requested on an empty log
    #[error("no history to replay")]
    NoHistoryToReplay,
}
