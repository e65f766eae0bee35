// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rate limiting over a TTL-bound shared counter store
//!
//! The counter state lives behind a store trait rather than an in-process
//! singleton, so a deployment with several service instances can point every
//! instance at one shared backend and keep the bound correct. Rate limiting
//! is an independent defense and never a substitute for the versioned
//! atomicity in [`crate::store`].

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{GameId, ServiceError};

/// TTL-bound counter backend.
pub trait CounterStore: Send + Sync {
    /// Increment the counter under `key`, starting a fresh window of `ttl`
    /// if none is active, and return the count within the current window.
    fn incr(&self, key: &str, ttl: Duration) -> u32;
}

/// In-memory counter backend for single-instance deployments and tests.
#[derive(Default)]
pub struct MemoryCounterStore {
    cells: Mutex<HashMap<String, (u32, DateTime<Utc>)>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn incr(&self, key: &str, ttl: Duration) -> u32 {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(60));
        let mut cells = self.cells.lock();

        // Drop windows that expired, not just the touched one
        cells.retain(|_, (_, expiry)| *expiry > now);

        let cell = cells.entry(key.to_string()).or_insert((0, now + ttl));
        cell.0 += 1;
        cell.0
    }
}

/// Bounds request frequency per (game, origin) pair.
pub struct RateLimiter {
    store: std::sync::Arc<dyn CounterStore>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: std::sync::Arc<dyn CounterStore>, limit: u32, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    /// Count one request and reject it if the window budget is spent.
    pub fn check(&self, game: GameId, origin: &str) -> Result<(), ServiceError> {
        let key = format!("{game}:{origin}");
        let count = self.store.incr(&key, self.window);
        if count > self.limit {
            tracing::warn!(game = %game, origin, count, "rate limit exceeded");
            return Err(ServiceError::RateLimited);
        }
        Ok(())
    }
}
