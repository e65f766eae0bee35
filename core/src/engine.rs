// SPDX-License-Identifier: MIT OR Apache-2.0

//! The variant-parameterized rule engine
//!
//! Split in two halves with different contracts:
//! - [`Engine::resolve`] validates a request against the current state and
//!   rolls any special effects, producing fully resolved log entries. This
//!   is the only place randomness enters.
//! - [`Engine::apply`] is the pure reducer `(state, action) -> state`. It is
//!   reused verbatim by apply-and-cache, undo-by-replay, and spectator
//!   step-through, which guarantees the three can never diverge.

use rand::Rng;

use crate::action::{Action, ActionKind, ActionOrigin};
use crate::capture::{self, CaptureOutcome};
use crate::effects::{self, EffectRecord};
use crate::state::GameState;
use crate::validate::Validator;
use crate::variant::{CreditPolicy, VariantConfig};
use crate::{ColorId, Coord, GameError, MoveRequest};

/// Rule engine for one variant configuration.
pub struct Engine<'a> {
    config: &'a VariantConfig,
    validator: Validator<'a>,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a VariantConfig) -> Self {
        Self {
            config,
            validator: Validator::new(config),
        }
    }

    pub fn config(&self) -> &VariantConfig {
        self.config
    }

    /// Validate a request and resolve its effects into one or two log
    /// entries: the player entry, plus a trailing maintenance entry when a
    /// drone fires.
    ///
    /// No mutation happens here; a rejected request leaves no trace.
    pub fn resolve<R: Rng>(
        &self,
        state: &GameState,
        request: &MoveRequest,
        rng: &mut R,
    ) -> Result<Vec<Action>, GameError> {
        let ts = chrono::Utc::now().timestamp();
        let move_number = state.move_number + 1;

        let (kind, played, color) = match *request {
            MoveRequest::Place { pos, color } => {
                self.validator.check_place(state, pos, color)?;
                (ActionKind::Place { pos, color }, Some(pos), Some(color))
            }
            MoveRequest::Move { from, to, color } => {
                self.validator.check_move(state, from, to, color)?;
                (ActionKind::Move { from, to, color }, Some(to), Some(color))
            }
            MoveRequest::Remove { pos } => {
                self.validator.check_remove(state, pos)?;
                (ActionKind::Remove { pos }, None, None)
            }
        };

        let effect = match (played, color) {
            (Some(pos), Some(color)) if state.mines.contains(pos) => {
                let mut sim = state.board.clone();
                if let ActionKind::Move { from, .. } = kind {
                    sim.remove(from);
                }
                sim.place(pos, color);
                let destroyed = effects::explosion_damage(&sim, pos);
                tracing::info!(?pos, hit = destroyed.len(), "mine triggered");
                Some(EffectRecord::Explosion {
                    trigger: pos,
                    color,
                    destroyed,
                })
            }
            _ => None,
        };

        let player_action = Action {
            move_number,
            origin: ActionOrigin::Player,
            kind,
            effect,
            ts,
        };
        let mut actions = vec![player_action];

        // Drone roll: only after a successful place/move, and only if no
        // explosion occurred. Judged against the post-capture board.
        let drones_enabled = self.config.drone_probability > 0.0;
        if let Some(mover) = color.filter(|_| drones_enabled && actions[0].effect.is_none()) {
            let after = self.apply(state, &actions[0]);
            if let Some(drone) = effects::roll_drone(&after.board, self.config, mover, rng) {
                let target = match &drone {
                    EffectRecord::DroneStrike { target, .. } => *target,
                    _ => unreachable!("roll_drone yields drone records"),
                };
                tracing::info!(?target, "drone strike");
                actions.push(Action {
                    move_number,
                    origin: ActionOrigin::Maintenance,
                    kind: ActionKind::Remove { pos: target },
                    effect: Some(drone),
                    ts,
                });
            }
        }

        Ok(actions)
    }

    /// Pure reducer: fold one resolved entry into a state.
    ///
    /// Total on well-formed entries; the ko point is reset before every
    /// action and only re-set by this action's own capture result, so it
    /// never leaks across actions during replay.
    pub fn apply(&self, state: &GameState, action: &Action) -> GameState {
        let mut next = state.clone();
        next.ko_point = None;

        match action.kind {
            ActionKind::Place { pos, color } => {
                next.board.place(pos, color);
                let pot = next.pot_mut(color);
                pot.pot = pot.pot.saturating_sub(1);
                pot.on_board += 1;
                next.last_move = Some(pos);
                self.settle_stone(&mut next, pos, color, action);
                next.placements += 1;
            }
            ActionKind::Move { from, to, color } => {
                next.board.remove(from);
                next.board.place(to, color);
                next.last_move = Some(to);
                self.settle_stone(&mut next, to, color, action);
                next.placements += 1;
            }
            ActionKind::Remove { pos } => {
                if let Some(color) = next.board.remove(pos) {
                    let destroyed =
                        matches!(action.effect, Some(EffectRecord::DroneStrike { .. }));
                    let pot = next.pot_mut(color);
                    pot.on_board = pot.on_board.saturating_sub(1);
                    if !destroyed {
                        // Manual pickup returns the stone to its pot
                        pot.pot += 1;
                    }
                }
            }
        }

        if action.origin == ActionOrigin::Player {
            next.move_number = action.move_number;
        }

        next
    }

    /// Post-placement settlement: either the recorded explosion, or normal
    /// capture resolution with crediting and ko derivation.
    fn settle_stone(&self, next: &mut GameState, played: Coord, color: ColorId, action: &Action) {
        match &action.effect {
            Some(EffectRecord::Explosion {
                trigger, destroyed, ..
            }) => {
                // Explosions suppress capture and ko processing entirely
                if let Some(c) = next.board.remove(*trigger) {
                    let pot = next.pot_mut(c);
                    pot.on_board = pot.on_board.saturating_sub(1);
                }
                for (cell, _) in destroyed {
                    if let Some(c) = next.board.remove(*cell) {
                        let pot = next.pot_mut(c);
                        pot.on_board = pot.on_board.saturating_sub(1);
                    }
                }
                next.mines.consume(*trigger);
            }
            _ => {
                let outcome =
                    capture::resolve(&mut next.board, played, self.config.color_count);
                if outcome.total_removed() > 0 {
                    self.credit_captures(next, color, &outcome);
                }
                next.ko_point = outcome.ko;
            }
        }
    }

    fn credit_captures(&self, next: &mut GameState, mover: ColorId, outcome: &CaptureOutcome) {
        let mut total = 0u16;
        for (idx, &count) in outcome.removed_by_color.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let pot = &mut next.pots[idx];
            pot.on_board = pot.on_board.saturating_sub(count);
            if idx != mover.index() {
                total += count;
            }
            if self.config.credit_policy == CreditPolicy::ReturnToOwner {
                pot.pot += count;
            }
        }

        if self.config.credit_policy == CreditPolicy::CreditCaptor {
            next.pot_mut(mover).captured += total;
        }

        if self.config.shared_colors {
            let after =
                ((next.placements + 1) % self.config.player_count as u32) as u8;
            let credited = self.config.credited_player(after);
            next.player_credits[credited as usize] += total;
            tracing::debug!(credited, total, "shared-color capture credit");
        }
    }
}
