//! Ships: a fixed footprint of cells with per-cell hit tracking.

use alloc::collections::BTreeMap;
use core::fmt;

use super::common::ShipError;
use super::coordinate::Coordinate;

/// Identity of a ship inside a board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(usize);

impl ShipId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}

/// Damage state derived from the hit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipState {
    #[default]
    Intact,
    Knocked,
    Destroyed,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    cells: BTreeMap<Coordinate, bool>,
    state: ShipState,
}

impl Ship {
    /// Build a ship over `coordinates` with every cell unhit.
    ///
    /// Returns `None` when the footprint is empty or names a cell twice.
    pub fn create<I>(id: ShipId, coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut cells = BTreeMap::new();
        for c in coordinates {
            if cells.insert(c, false).is_some() {
                return None;
            }
        }
        if cells.is_empty() {
            return None;
        }
        Some(Ship {
            id,
            cells,
            state: ShipState::Intact,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn state(&self) -> ShipState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == ShipState::Destroyed
    }

    /// Cells occupied by the ship.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.keys().copied()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    /// Record a hit. Cells outside the footprint are ignored; a second hit on the
    /// same cell is an error and leaves the ship unchanged.
    pub fn damage(&mut self, coordinate: Coordinate) -> Result<(), ShipError> {
        let Some(hit) = self.cells.get_mut(&coordinate) else {
            return Ok(());
        };
        if *hit {
            return Err(ShipError::AlreadyHit(coordinate));
        }
        *hit = true;

        let hits = self.cells.values().filter(|&&h| h).count();
        self.state = if hits == self.cells.len() {
            ShipState::Destroyed
        } else {
            ShipState::Knocked
        };
        Ok(())
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, cells: {}, hits: {}, state: {:?} }}",
            self.id,
            self.cells.len(),
            self.cells.values().filter(|&&h| h).count(),
            self.state,
        )
    }
}
