// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end service tests over the in-memory store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use goban_core::action::Action;
use goban_core::variant::VariantConfig;
use goban_core::{ColorId, Coord, GameError, MoveRequest};
use goban_service::auth::{OpenAccess, StaticTokens};
use goban_service::rate_limit::{MemoryCounterStore, RateLimiter};
use goban_service::store::{GameStore, MemoryStore, StoreError};
use goban_service::{GameId, GameRecord, GameService, ServiceError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn open_service() -> GameService {
    GameService::new(Arc::new(MemoryStore::new()), Arc::new(OpenAccess))
}

fn place_json(x: u8, y: u8, color: u8) -> serde_json::Value {
    json!({"type": "place", "pos": {"x": x, "y": y}, "color": color})
}

#[test]
fn create_and_place_through_the_json_boundary() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let service = open_service();
    let (id, view) = service.create_game(VariantConfig::classic(9))?;
    assert_eq!(view.move_number, 0);

    let view = service.apply_action(id, Some("anyone"), "origin-1", &place_json(3, 4, 0))?;
    assert_eq!(view.rows[4][3], Some(0));
    assert_eq!(view.move_number, 1);
    assert_eq!(view.expected_color, 1);
    assert_eq!(service.history(id)?.len(), 1);
    Ok(())
}

#[test]
fn invalid_config_is_rejected_at_creation() {
    let service = open_service();
    assert!(matches!(
        service.create_game(VariantConfig::classic(21)),
        Err(ServiceError::Config(_))
    ));
}

#[test]
fn authentication_gates_mutations() {
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(StaticTokens::new());
    let service = GameService::new(store, tokens.clone());

    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();
    tokens.grant(id, "secret");

    assert_eq!(
        service.apply_action(id, None, "o", &place_json(0, 0, 0)),
        Err(ServiceError::AuthenticationRequired)
    );
    assert_eq!(
        service.apply_action(id, Some("wrong"), "o", &place_json(0, 0, 0)),
        Err(ServiceError::AuthenticationInvalid)
    );
    assert!(service
        .apply_action(id, Some("secret"), "o", &place_json(0, 0, 0))
        .is_ok());

    // Reads stay open to spectators
    assert_eq!(service.history(id).unwrap().len(), 1);
}

#[test]
fn unknown_action_type_is_surfaced() {
    let service = open_service();
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();
    assert_eq!(
        service.apply_action(id, Some("k"), "o", &json!({"type": "detonate"})),
        Err(ServiceError::UnknownActionType("detonate".into()))
    );
}

#[test]
fn rule_rejections_leave_no_trace() {
    let service = open_service();
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();

    assert_eq!(
        service.apply_action(id, Some("k"), "o", &place_json(0, 0, 1)),
        Err(ServiceError::Rules(GameError::OutOfTurn))
    );
    assert!(service.history(id).unwrap().is_empty());

    let missing = GameId::new();
    assert_eq!(
        service.apply_action(missing, Some("k"), "o", &place_json(0, 0, 0)),
        Err(ServiceError::GameNotFound)
    );
}

#[test]
fn undo_walks_back_to_the_empty_board() {
    let service = open_service();
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();

    service
        .apply_action(id, Some("k"), "o", &place_json(2, 2, 0))
        .unwrap();
    service
        .apply_action(id, Some("k"), "o", &place_json(6, 6, 1))
        .unwrap();

    let view = service.undo(id, Some("k")).unwrap();
    assert_eq!(view.rows[6][6], None);
    assert_eq!(view.rows[2][2], Some(0));
    assert_eq!(view.move_number, 1);
    assert_eq!(service.history(id).unwrap().len(), 1);

    let view = service.undo(id, Some("k")).unwrap();
    assert_eq!(view.move_number, 0);
    assert_eq!(
        service.undo(id, Some("k")),
        Err(ServiceError::Rules(GameError::NoHistoryToUndo))
    );
}

#[test]
fn rate_limiter_bounds_request_frequency() {
    let limiter = RateLimiter::new(
        Arc::new(MemoryCounterStore::new()),
        1,
        Duration::from_secs(60),
    );
    let service = open_service().with_rate_limiter(limiter);
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();

    assert!(service
        .apply_action(id, Some("k"), "alice", &place_json(0, 0, 0))
        .is_ok());
    assert_eq!(
        service.apply_action(id, Some("k"), "alice", &place_json(1, 0, 1)),
        Err(ServiceError::RateLimited)
    );
    // Another origin still has budget
    assert!(service
        .apply_action(id, Some("k"), "bob", &place_json(1, 0, 1))
        .is_ok());
}

#[test]
fn spectator_replay_steps_through_every_action() {
    let service = open_service();
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();

    assert_eq!(
        service.replay_views(id),
        Err(ServiceError::Rules(GameError::NoHistoryToReplay))
    );

    service
        .apply_action(id, Some("k"), "o", &place_json(4, 4, 0))
        .unwrap();
    let current = service
        .apply_action(id, Some("k"), "o", &place_json(3, 3, 1))
        .unwrap();

    let steps = service.replay_views(id).unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].rows[4][4], Some(0));
    assert_eq!(steps[0].rows[3][3], None);
    assert_eq!(steps.last().unwrap(), &current);
}

/// Store wrapper that loses the version race exactly once.
struct FlakyStore {
    inner: MemoryStore,
    tripped: AtomicBool,
}

impl GameStore for FlakyStore {
    fn insert(&self, record: &GameRecord) -> Result<(), StoreError> {
        self.inner.insert(record)
    }
    fn load(&self, id: GameId) -> Result<GameRecord, StoreError> {
        self.inner.load(id)
    }
    fn update(&self, record: &GameRecord, expected_version: u64) -> Result<(), StoreError> {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            return Err(StoreError::VersionConflict);
        }
        self.inner.update(record, expected_version)
    }
    fn actions(&self, id: GameId) -> Result<Vec<Action>, StoreError> {
        self.inner.actions(id)
    }
    fn delete(&self, id: GameId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }
}

#[test]
fn version_race_is_retried_transparently() {
    let service = GameService::new(
        Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            tripped: AtomicBool::new(false),
        }),
        Arc::new(OpenAccess),
    );
    let (id, _) = service.create_game(VariantConfig::classic(9)).unwrap();

    let mut rng = StdRng::seed_from_u64(2);
    let view = service
        .apply_request(
            id,
            &MoveRequest::Place {
                pos: Coord::new(4, 4),
                color: ColorId(0),
            },
            &mut rng,
        )
        .unwrap();
    assert_eq!(view.rows[4][4], Some(0));
    assert_eq!(service.history(id).unwrap().len(), 1);
}
