// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log replay: state reconstruction, undo, spectator step-through
//!
//! There is no snapshot-based undo anywhere in the system; every past state
//! is re-derived by folding the pure reducer over a log prefix from an
//! empty board and fresh pots.

use crate::action::{Action, ActionOrigin};
use crate::effects::MineField;
use crate::engine::Engine;
use crate::state::GameState;
use crate::variant::VariantConfig;
use crate::GameError;

/// Reconstruct the state after every entry of `log`, starting from an empty
/// board, fully stocked pots, and the mine set fixed at creation.
pub fn reconstruct(config: &VariantConfig, mines: MineField, log: &[Action]) -> GameState {
    let engine = Engine::new(config);
    log.iter().fold(GameState::new(config, mines), |state, action| {
        engine.apply(&state, action)
    })
}

/// Log length to keep for an undo: drops the most recent player entry and
/// every maintenance entry logged after it.
pub fn undo_keep_len(log: &[Action]) -> Result<usize, GameError> {
    log.iter()
        .rposition(|a| a.origin == ActionOrigin::Player)
        .ok_or(GameError::NoHistoryToUndo)
}

/// Undo by replay: reconstruct the state of the truncated log and return it
/// with the kept length.
pub fn undo(
    config: &VariantConfig,
    mines: MineField,
    log: &[Action],
) -> Result<(GameState, usize), GameError> {
    let keep = undo_keep_len(log)?;
    tracing::debug!(dropped = log.len() - keep, "undo by replay");
    Ok((reconstruct(config, mines, &log[..keep]), keep))
}

/// Spectator step-through: yields the state after each successive log
/// entry, driven by the same reducer as live play and undo.
pub struct Replay<'a> {
    engine: Engine<'a>,
    log: &'a [Action],
    state: GameState,
    cursor: usize,
}

impl<'a> Replay<'a> {
    /// Start a replay; an empty log has nothing to step through.
    pub fn new(
        config: &'a VariantConfig,
        mines: MineField,
        log: &'a [Action],
    ) -> Result<Self, GameError> {
        if log.is_empty() {
            return Err(GameError::NoHistoryToReplay);
        }
        Ok(Self {
            engine: Engine::new(config),
            log,
            state: GameState::new(config, mines),
            cursor: 0,
        })
    }
}

impl Iterator for Replay<'_> {
    type Item = GameState;

    fn next(&mut self) -> Option<GameState> {
        let action = self.log.get(self.cursor)?;
        self.cursor += 1;
        self.state = self.engine.apply(&self.state, action);
        Some(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::{ColorId, Coord};

    fn place(move_number: u32, x: u8, y: u8, color: u8) -> Action {
        Action {
            move_number,
            origin: ActionOrigin::Player,
            kind: ActionKind::Place {
                pos: Coord::new(x, y),
                color: ColorId(color),
            },
            effect: None,
            ts: 0,
        }
    }

    #[test]
    fn empty_log_has_nothing_to_replay() {
        let config = VariantConfig::classic(9);
        assert!(matches!(
            Replay::new(&config, MineField::empty(), &[]),
            Err(GameError::NoHistoryToReplay)
        ));
    }

    #[test]
    fn stepper_matches_reconstruct_at_every_prefix() {
        let config = VariantConfig::classic(9);
        let log = vec![
            place(1, 2, 2, 0),
            place(2, 6, 6, 1),
            place(3, 3, 2, 0),
            place(4, 6, 5, 1),
        ];

        let mut replay = Replay::new(&config, MineField::empty(), &log).unwrap();
        for n in 1..=log.len() {
            let stepped = replay.next().unwrap();
            let rebuilt = reconstruct(&config, MineField::empty(), &log[..n]);
            assert_eq!(stepped, rebuilt, "prefix {n}");
        }
        assert!(replay.next().is_none());
    }

    #[test]
    fn undo_refuses_empty_history() {
        let config = VariantConfig::classic(9);
        assert_eq!(
            undo(&config, MineField::empty(), &[]).unwrap_err(),
            GameError::NoHistoryToUndo
        );
    }

    #[test]
    fn undo_strips_trailing_maintenance() {
        let drone = Action {
            move_number: 2,
            origin: ActionOrigin::Maintenance,
            kind: ActionKind::Remove {
                pos: Coord::new(6, 6),
            },
            effect: Some(crate::effects::EffectRecord::DroneStrike {
                launched_from: Coord::new(0, 0),
                target: Coord::new(6, 6),
                color: ColorId(1),
            }),
            ts: 0,
        };
        let log = vec![place(1, 2, 2, 0), place(2, 6, 6, 1), drone];

        assert_eq!(undo_keep_len(&log).unwrap(), 1);
        let (state, keep) = undo(&VariantConfig::classic(9), MineField::empty(), &log).unwrap();
        assert_eq!(keep, 1);
        assert_eq!(state.board.get(Coord::new(2, 2)), Some(ColorId(0)));
        assert_eq!(state.board.get(Coord::new(6, 6)), None);
        assert_eq!(state.move_number, 1);
    }
}
