//! Common types for the engine: error kinds and the errors raised by ships and sessions.

use alloc::string::String;
use core::fmt;

use super::coordinate::Coordinate;

/// Classification of a failed operation, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The caller sent malformed or out-of-range input.
    BadRequest,
    /// The operation is not valid in the current game phase.
    InvalidState,
    /// An invariant was violated; not the caller's fault and not retryable.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BadRequest => write!(f, "bad request"),
            ErrorKind::InvalidState => write!(f, "invalid state"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

/// Errors returned by [`Ship`](super::ship::Ship) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipError {
    /// The cell was already hit; a second hit means a stale or racing shot.
    AlreadyHit(Coordinate),
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipError::AlreadyHit(c) => write!(f, "Already hit at {}.", c),
        }
    }
}

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    BadRequest(String),
    InvalidState(String),
    /// Ship invariant violation raised while resolving a shot.
    Fatal(ShipError),
    /// Failure outside the engine, e.g. a worker task that did not complete.
    Internal(String),
}

impl GameError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        GameError::BadRequest(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        GameError::InvalidState(message.into())
    }

    /// Rebuild an error from its wire form.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        match kind {
            ErrorKind::BadRequest => GameError::BadRequest(message.into()),
            ErrorKind::InvalidState => GameError::InvalidState(message.into()),
            ErrorKind::Internal => GameError::Internal(message.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::BadRequest(_) => ErrorKind::BadRequest,
            GameError::InvalidState(_) => ErrorKind::InvalidState,
            GameError::Fatal(_) | GameError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<ShipError> for GameError {
    fn from(err: ShipError) -> Self {
        GameError::Fatal(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::BadRequest(msg) | GameError::InvalidState(msg) => write!(f, "{}", msg),
            GameError::Fatal(e) => write!(f, "{}", e),
            GameError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShipError {}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

#[cfg(feature = "std")]
impl ErrorKind {
    /// Classify a service-level error. Anything that is not a [`GameError`] is internal.
    pub fn of(err: &anyhow::Error) -> ErrorKind {
        err.downcast_ref::<GameError>()
            .map(GameError::kind)
            .unwrap_or(ErrorKind::Internal)
    }
}
