// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service-level error taxonomy
//!
//! Rule errors pass through transparently; everything else here is either a
//! boundary failure (auth, malformed JSON) or an infrastructure outcome.
//! Only [`ServiceError::VersionConflict`] is retryable by callers.

use thiserror::Error;

use goban_core::variant::ConfigError;
use goban_core::GameError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// No credential was presented for a mutating call
    #[error("authentication required")]
    AuthenticationRequired,

    /// The presented credential is not valid for this game
    #[error("authentication invalid")]
    AuthenticationInvalid,

    /// No game exists under the given id
    #[error("game not found")]
    GameNotFound,

    /// The action payload named a type the service does not know
    #[error("unknown action type: {0}")]
    UnknownActionType(String),

    /// The action payload had a known type but a malformed shape
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Too many requests for this game from this origin
    #[error("rate limit exceeded")]
    RateLimited,

    /// Concurrent mutation lost the version race; retryable
    #[error("version conflict")]
    VersionConflict,

    /// The variant configuration was rejected at creation
    #[error("invalid variant configuration: {0}")]
    Config(#[from] ConfigError),

    /// A rule validation rejected the action; surfaced verbatim
    #[error(transparent)]
    Rules(#[from] GameError),

    /// Stored record bytes failed to encode or decode
    #[error("storage codec failure: {0}")]
    Codec(String),
}
