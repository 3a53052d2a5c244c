//! Core grid-combat engine (no_std compatible)
//!
//! Pure game logic over `alloc`: coordinate codec, ships, the grid, placement,
//! shot resolution and statistics. Locking and lifecycle live in
//! [`crate::session`].

pub mod common;
pub mod config;
pub mod coordinate;
pub mod grid;
pub mod placement;
pub mod ship;
pub mod shot;
pub mod statistic;

// Re-export commonly used types
pub use common::{ErrorKind, GameError, ShipError};
pub use config::{COLUMNS, MAX_RANGE, MIN_RANGE};
pub use coordinate::Coordinate;
pub use grid::{Board, Grid};
pub use placement::Footprint;
pub use ship::{Ship, ShipId, ShipState};
pub use shot::{ShotOutcome, ShotResult};
pub use statistic::GameStatistic;
