//! Square board of cells referencing ships stored in an arena.

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use super::coordinate::Coordinate;
use super::ship::{Ship, ShipId};

/// `range`×`range` cells, each holding the id of the ship occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    range: usize,
    cells: Vec<Option<ShipId>>,
}

impl Grid {
    pub fn new(range: usize) -> Self {
        Grid {
            range,
            cells: vec![None; range * range],
        }
    }

    pub fn range(&self) -> usize {
        self.range
    }

    fn index(&self, c: Coordinate) -> Option<usize> {
        c.within(self.range).then(|| c.row() * self.range + c.column())
    }

    /// Ship occupying `c`, if any. Off-board cells are empty.
    pub fn get(&self, c: Coordinate) -> Option<ShipId> {
        self.index(c).and_then(|i| self.cells[i])
    }

    /// Point `c` at `ship`, replacing any previous occupant.
    /// Returns `false` if `c` is off the board.
    pub fn set(&mut self, c: Coordinate, ship: ShipId) -> bool {
        match self.index(c) {
            Some(i) => {
                self.cells[i] = Some(ship);
                true
            }
            None => false,
        }
    }

    /// Distinct ships referenced by at least one cell.
    pub fn occupants(&self) -> BTreeSet<ShipId> {
        self.cells.iter().flatten().copied().collect()
    }
}

/// A grid together with the arena owning every ship placed on it.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    ships: Vec<Ship>,
}

impl Board {
    pub fn new(range: usize) -> Self {
        Board {
            grid: Grid::new(range),
            ships: Vec::new(),
        }
    }

    pub fn range(&self) -> usize {
        self.grid.range()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Identity the next inserted ship will receive.
    pub fn next_id(&self) -> ShipId {
        ShipId::new(self.ships.len())
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.index())
    }

    pub fn ship_at(&self, c: Coordinate) -> Option<ShipId> {
        self.grid.get(c)
    }

    /// Move `ship` into the arena and point each of its cells at it.
    /// Cells already pointing at another ship are overwritten.
    pub(crate) fn insert(&mut self, ship: Ship) -> ShipId {
        let id = ship.id();
        for c in ship.coordinates() {
            self.grid.set(c, id);
        }
        self.ships.push(ship);
        id
    }

    /// Ships still reachable from the grid, in id order.
    pub fn ships_on_grid(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.grid
            .occupants()
            .into_iter()
            .filter_map(move |id| self.ship(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_board_cells_are_empty_and_unwritable() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.get(Coordinate::new(3, 0)), None);
        assert!(!grid.set(Coordinate::new(0, 3), ShipId::new(0)));
        assert!(grid.set(Coordinate::new(2, 2), ShipId::new(0)));
        assert_eq!(grid.get(Coordinate::new(2, 2)), Some(ShipId::new(0)));
    }

    #[test]
    fn overwritten_ship_drops_off_the_grid() {
        let mut board = Board::new(5);
        let first = Ship::create(board.next_id(), [Coordinate::new(0, 0)]).unwrap();
        board.insert(first);
        let second = Ship::create(board.next_id(), [Coordinate::new(0, 0), Coordinate::new(1, 0)]).unwrap();
        let id = board.insert(second);

        let ids: Vec<ShipId> = board.ships_on_grid().map(Ship::id).collect();
        assert_eq!(ids, vec![id]);
    }
}
