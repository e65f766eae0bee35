// SPDX-License-Identifier: MIT OR Apache-2.0

//! The game service: create, apply, undo, history
//!
//! Every mutation is one atomic unit: read current state, validate, compute
//! next state, append actions, write - guarded by the record's optimistic
//! version token. Losing the version race reloads and retries a bounded
//! number of times; rule rejections are terminal for the request and never
//! partially write.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use goban_core::action::Action;
use goban_core::effects::MineField;
use goban_core::engine::Engine;
use goban_core::replay;
use goban_core::state::GameState;
use goban_core::variant::VariantConfig;
use goban_core::view::GameView;
use goban_core::MoveRequest;

use crate::auth::Authorizer;
use crate::rate_limit::RateLimiter;
use crate::request;
use crate::store::{GameStore, StoreError};
use crate::{GameId, GameRecord, ServiceError};

/// Version-race retries before giving up and surfacing the conflict
const MAX_RETRIES: u32 = 3;

pub struct GameService {
    store: Arc<dyn GameStore>,
    auth: Arc<dyn Authorizer>,
    limiter: Option<RateLimiter>,
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>, auth: Arc<dyn Authorizer>) -> Self {
        Self {
            store,
            auth,
            limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Create a game: empty board, fully stocked pots, mines armed.
    pub fn create_game(&self, config: VariantConfig) -> Result<(GameId, GameView), ServiceError> {
        self.create_game_with_rng(config, &mut StdRng::from_entropy())
    }

    /// Creation with a caller-supplied RNG, for deterministic mine layouts.
    pub fn create_game_with_rng<R: Rng>(
        &self,
        config: VariantConfig,
        rng: &mut R,
    ) -> Result<(GameId, GameView), ServiceError> {
        config.validate()?;

        let mines = MineField::generate(&config, rng);
        let state = GameState::new(&config, mines.clone());
        let record = GameRecord {
            id: GameId::new(),
            config,
            initial_mines: mines,
            log: Vec::new(),
            state,
            version: 0,
            created_at: chrono::Utc::now(),
        };
        self.store.insert(&record)?;

        tracing::info!(game = %record.id, "game created");
        Ok((record.id, record.view()))
    }

    /// Apply a JSON action payload from an authorized caller.
    pub fn apply_action(
        &self,
        id: GameId,
        credential: Option<&str>,
        origin: &str,
        payload: &Value,
    ) -> Result<GameView, ServiceError> {
        let request = request::parse_action(payload)?;
        self.authorize(id, credential)?;
        if let Some(limiter) = &self.limiter {
            limiter.check(id, origin)?;
        }
        self.apply_request(id, &request, &mut StdRng::from_entropy())
    }

    /// Typed apply path; effects roll on the supplied RNG.
    pub fn apply_request<R: Rng>(
        &self,
        id: GameId,
        request: &MoveRequest,
        rng: &mut R,
    ) -> Result<GameView, ServiceError> {
        self.mutate(id, |record| {
            let engine = Engine::new(&record.config);
            let actions = engine.resolve(&record.state, request, rng)?;

            let mut state = record.state.clone();
            for action in &actions {
                state = engine.apply(&state, action);
            }
            record.state = state;
            record.log.extend(actions);
            Ok(())
        })
    }

    /// Undo the most recent player action (plus its trailing maintenance
    /// entries) by replaying the shortened log from scratch.
    pub fn undo(&self, id: GameId, credential: Option<&str>) -> Result<GameView, ServiceError> {
        self.authorize(id, credential)?;
        self.mutate(id, |record| {
            let (state, keep) =
                replay::undo(&record.config, record.initial_mines.clone(), &record.log)?;
            record.log.truncate(keep);
            record.state = state;
            Ok(())
        })
    }

    /// Ordered action log, for replay and spectator consumers.
    pub fn history(&self, id: GameId) -> Result<Vec<Action>, ServiceError> {
        Ok(self.store.actions(id)?)
    }

    /// Spectator replay: the state after each logged action, derived by the
    /// same reducer as live play.
    pub fn replay_views(&self, id: GameId) -> Result<Vec<GameView>, ServiceError> {
        let record = self.store.load(id)?;
        let steps = replay::Replay::new(
            &record.config,
            record.initial_mines.clone(),
            &record.log,
        )?;
        Ok(steps
            .map(|state| GameView::from_state(&record.config, &state))
            .collect())
    }

    /// Read-modify-write with optimistic version retry.
    fn mutate(
        &self,
        id: GameId,
        mut op: impl FnMut(&mut GameRecord) -> Result<(), ServiceError>,
    ) -> Result<GameView, ServiceError> {
        for attempt in 0..MAX_RETRIES {
            let mut record = self.store.load(id)?;
            let expected = record.version;

            op(&mut record)?;
            record.version = expected + 1;

            match self.store.update(&record, expected) {
                Ok(()) => return Ok(record.view()),
                Err(StoreError::VersionConflict) => {
                    tracing::warn!(game = %id, attempt, "version race lost, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ServiceError::VersionConflict)
    }

    fn authorize(&self, id: GameId, credential: Option<&str>) -> Result<(), ServiceError> {
        let credential = credential.ok_or(ServiceError::AuthenticationRequired)?;
        if !self.auth.is_authorized(id, credential) {
            return Err(ServiceError::AuthenticationInvalid);
        }
        Ok(())
    }
}
