// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move validation: bounds, occupancy, pots, turn order, suicide, ko
//!
//! Validation is strictly prior to mutation; every check here runs on
//! simulated boards and never touches the caller's state.

use crate::board::Board;
use crate::groups;
use crate::state::GameState;
use crate::variant::{TurnPolicy, VariantConfig};
use crate::{ColorId, Coord, GameError};

/// Validates requests against a derived game state for one variant.
pub struct Validator<'a> {
    config: &'a VariantConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a VariantConfig) -> Self {
        Self { config }
    }

    /// Check a placement from the pot.
    pub fn check_place(
        &self,
        state: &GameState,
        pos: Coord,
        color: ColorId,
    ) -> Result<(), GameError> {
        if !state.board.in_bounds(pos) {
            return Err(GameError::InvalidCoordinates);
        }
        if state.board.get(pos).is_some() {
            return Err(GameError::CellOccupied);
        }
        if color.0 >= self.config.color_count {
            // A color outside the variant can never be on turn
            return Err(GameError::OutOfTurn);
        }
        if state.pot(color).pot == 0 {
            return Err(GameError::PotExhausted(color.0));
        }
        self.check_turn(state, color)?;

        if is_suicide(&state.board, None, pos, color) {
            return Err(GameError::SuicideMove);
        }
        if state.ko_point == Some(pos) {
            tracing::debug!(?pos, "rejected immediate ko recapture");
            return Err(GameError::KoViolation);
        }
        Ok(())
    }

    /// Check relocating a stone. Identical to placement except `from` is
    /// virtually vacated before occupancy and suicide are judged at `to`.
    pub fn check_move(
        &self,
        state: &GameState,
        from: Coord,
        to: Coord,
        color: ColorId,
    ) -> Result<(), GameError> {
        if !state.board.in_bounds(from) || !state.board.in_bounds(to) {
            return Err(GameError::InvalidCoordinates);
        }
        match state.board.get(from) {
            None => return Err(GameError::CellEmpty),
            Some(c) if c != color => return Err(GameError::OutOfTurn),
            Some(_) => {}
        }
        if from != to && state.board.get(to).is_some() {
            return Err(GameError::CellOccupied);
        }
        self.check_turn(state, color)?;

        if is_suicide(&state.board, Some(from), to, color) {
            return Err(GameError::SuicideMove);
        }
        if state.ko_point == Some(to) {
            return Err(GameError::KoViolation);
        }
        Ok(())
    }

    /// Manual stone pickup: legal for any occupied cell, in every variant.
    pub fn check_remove(&self, state: &GameState, pos: Coord) -> Result<(), GameError> {
        if !state.board.in_bounds(pos) {
            return Err(GameError::InvalidCoordinates);
        }
        if state.board.get(pos).is_none() {
            return Err(GameError::CellEmpty);
        }
        Ok(())
    }

    fn check_turn(&self, state: &GameState, color: ColorId) -> Result<(), GameError> {
        match self.config.turn_policy {
            TurnPolicy::Trusted => Ok(()),
            TurnPolicy::Enforced => {
                if self.config.expected_color(state) == color {
                    Ok(())
                } else {
                    Err(GameError::OutOfTurn)
                }
            }
        }
    }
}

/// Two-phase suicide check.
///
/// (a) simulate placing the stone (vacating `vacate` first for moves);
/// (b) remove every adjacent opponent group that would then have zero
/// liberties, mirroring what the capture resolver will do;
/// (c) the move is suicide iff the placed stone's own group has zero
/// liberties on the post-removal board.
pub fn is_suicide(board: &Board, vacate: Option<Coord>, pos: Coord, color: ColorId) -> bool {
    let mut sim = board.clone();
    if let Some(from) = vacate {
        sim.remove(from);
    }
    if !sim.place(pos, color) {
        return false;
    }

    for neighbor in sim.adjacent(pos) {
        match sim.get(neighbor) {
            Some(c) if c != color => {
                let enemy = groups::group(&sim, neighbor);
                if groups::liberties(&sim, &enemy) == 0 {
                    for member in enemy {
                        sim.remove(member);
                    }
                }
            }
            _ => {}
        }
    }

    let own = groups::group(&sim, pos);
    groups::liberties(&sim, &own) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::MineField;

    fn state_for(config: &VariantConfig) -> GameState {
        GameState::new(config, MineField::empty())
    }

    #[test]
    fn corner_suicide_detected() {
        let config = VariantConfig::classic(9);
        let mut state = state_for(&config);
        state.board.place(Coord::new(1, 0), ColorId(1));
        state.board.place(Coord::new(0, 1), ColorId(1));

        let validator = Validator::new(&config);
        assert_eq!(
            validator.check_place(&state, Coord::new(0, 0), ColorId(0)),
            Err(GameError::SuicideMove)
        );
        // The same corner is fine for the surrounding color
        state.placements = 1; // white's turn
        assert!(validator
            .check_place(&state, Coord::new(0, 0), ColorId(1))
            .is_ok());
    }

    #[test]
    fn capture_legalizes_zero_liberty_placement() {
        let config = VariantConfig::classic(9);
        let mut state = state_for(&config);
        // White in the corner, down to its last liberty at (0,0)
        state.board.place(Coord::new(0, 1), ColorId(1));
        state.board.place(Coord::new(1, 1), ColorId(0));
        state.board.place(Coord::new(0, 2), ColorId(0));
        state.board.place(Coord::new(1, 0), ColorId(0));

        // (0,0) has no liberties of its own, but captures (0,1) first
        assert!(!is_suicide(&state.board, None, Coord::new(0, 0), ColorId(0)));
    }

    #[test]
    fn move_vacates_origin_before_judging_target() {
        let config = VariantConfig::classic(9);
        let mut state = state_for(&config);
        state.board.place(Coord::new(4, 4), ColorId(0));

        let validator = Validator::new(&config);
        // Moving a stone onto its own cell is a no-op relocation, not an
        // occupancy error
        assert!(validator
            .check_move(&state, Coord::new(4, 4), Coord::new(4, 4), ColorId(0))
            .is_ok());
        assert_eq!(
            validator.check_move(&state, Coord::new(3, 3), Coord::new(2, 3), ColorId(0)),
            Err(GameError::CellEmpty)
        );
    }

    #[test]
    fn pot_and_turn_checks() {
        let config = VariantConfig::classic(9);
        let mut state = state_for(&config);
        let validator = Validator::new(&config);

        assert_eq!(
            validator.check_place(&state, Coord::new(0, 0), ColorId(1)),
            Err(GameError::OutOfTurn)
        );

        state.pot_mut(ColorId(0)).pot = 0;
        assert_eq!(
            validator.check_place(&state, Coord::new(0, 0), ColorId(0)),
            Err(GameError::PotExhausted(0))
        );
    }

    #[test]
    fn ko_point_blocks_target() {
        let config = VariantConfig::classic(9);
        let mut state = state_for(&config);
        state.ko_point = Some(Coord::new(2, 2));
        let validator = Validator::new(&config);
        assert_eq!(
            validator.check_place(&state, Coord::new(2, 2), ColorId(0)),
            Err(GameError::KoViolation)
        );
    }
}
