//! Commonly used types and utilities for ease of import.

pub use crate::core::{Coordinate, ErrorKind, GameError, GameStatistic, ShipState, ShotResult};

#[cfg(feature = "std")]
pub use crate::{GameApi, GameSession, SessionHandle, Skeleton, Stub};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
