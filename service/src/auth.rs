// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity collaborator seam
//!
//! The real deployment checks a public/private keypair; the service only
//! ever needs the boolean answer, so that is the whole interface.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::GameId;

/// Answers whether a credential may mutate a game.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, game: GameId, credential: &str) -> bool;
}

/// Accepts every credential; for open boards and tests.
pub struct OpenAccess;

impl Authorizer for OpenAccess {
    fn is_authorized(&self, _game: GameId, _credential: &str) -> bool {
        true
    }
}

/// A fixed credential per game.
#[derive(Default)]
pub struct StaticTokens {
    tokens: RwLock<HashMap<GameId, String>>,
}

impl StaticTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the credential allowed to mutate a game
    pub fn grant(&self, game: GameId, credential: impl Into<String>) {
        self.tokens.write().insert(game, credential.into());
    }
}

impl Authorizer for StaticTokens {
    fn is_authorized(&self, game: GameId, credential: &str) -> bool {
        self.tokens
            .read()
            .get(&game)
            .map(|t| t == credential)
            .unwrap_or(false)
    }
}
