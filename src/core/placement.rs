//! Ship placement from text specs such as `"1A 2B, 3D 3E"`.
//!
//! Each spec names two endpoints. Endpoints on a shared row or column become a
//! two-cell ship as given. Diagonal endpoints grow two extra cells next to the
//! anchor (the endpoint on the lower row), which makes a 2×2 block when the
//! endpoints touch and a disconnected four-cell ship when they do not.
//! Only the anchor cell is checked for an existing ship.

use alloc::format;
use alloc::vec::Vec;

use super::common::GameError;
use super::config::{ENDPOINT_SEPARATOR, LIST_SEPARATOR};
use super::coordinate::{parse_list, split_list, Coordinate};
use super::grid::Board;
use super::ship::{Ship, ShipId};

/// Footprint of one ship spec before it is written to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    anchor: Coordinate,
    cells: Vec<Coordinate>,
}

impl Footprint {
    /// Footprint described by two endpoints.
    pub fn from_endpoints(first: Coordinate, second: Coordinate) -> Self {
        let anchor = if second.row() < first.row() { second } else { first };
        let mut cells = Vec::from([first, second]);
        if first.column() != second.column() && first.row() != second.row() {
            cells.push(Coordinate::new(anchor.column(), anchor.row() + 1));
            cells.push(Coordinate::new(anchor.column() + 1, anchor.row()));
        }
        Footprint { anchor, cells }
    }

    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }
}

/// Parse `spec` into footprints for a `range`-sized board.
///
/// Specs that do not yield exactly two cells are dropped. Out-of-range tokens fail
/// the whole parse, even inside a spec that would have been dropped.
pub fn parse_ships(spec: &str, range: usize) -> Result<Vec<Footprint>, GameError> {
    let mut footprints = Vec::new();
    for pair in split_list(spec, LIST_SEPARATOR) {
        let cells = parse_list(pair, ENDPOINT_SEPARATOR, range)?;
        if let &[first, second] = cells.as_slice() {
            footprints.push(Footprint::from_endpoints(first, second));
        }
    }
    Ok(footprints)
}

/// Write one footprint onto `board` as a new ship.
pub fn place(board: &mut Board, footprint: &Footprint) -> Result<ShipId, GameError> {
    if board.ship_at(footprint.anchor()).is_some() {
        return Err(GameError::bad_request("Ship has been added already."));
    }
    let range = board.range();
    if let Some(c) = footprint.cells().iter().find(|c| !c.within(range)) {
        return Err(GameError::bad_request(format!(
            "Ship cell {} is out of range.",
            c
        )));
    }
    let ship = Ship::create(board.next_id(), footprint.cells().iter().copied()).ok_or_else(|| {
        GameError::bad_request(format!(
            "Ship at {} names the same cell twice.",
            footprint.anchor()
        ))
    })?;
    Ok(board.insert(ship))
}

/// Parse `spec` and place every ship it describes, stopping at the first error.
///
/// On error the board may hold the ships placed before the failure; callers are
/// expected to discard it.
pub fn place_ships(board: &mut Board, spec: &str) -> Result<Vec<ShipId>, GameError> {
    let footprints = parse_ships(spec, board.range())?;
    footprints.iter().map(|f| place(board, f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(token: &str) -> Coordinate {
        Coordinate::parse(token).unwrap()
    }

    #[test]
    fn straight_endpoints_are_not_interpolated() {
        let f = Footprint::from_endpoints(c("3D"), c("3G"));
        assert_eq!(f.cells(), &[c("3D"), c("3G")]);
        assert_eq!(f.anchor(), c("3D"));
    }

    #[test]
    fn diagonal_endpoints_grow_a_block_at_the_anchor() {
        let f = Footprint::from_endpoints(c("2B"), c("1A"));
        assert_eq!(f.anchor(), c("1A"));
        assert_eq!(f.cells(), &[c("2B"), c("1A"), c("2A"), c("1B")]);
    }

    #[test]
    fn far_diagonal_keeps_the_disconnected_cells() {
        let f = Footprint::from_endpoints(c("1A"), c("4D"));
        assert_eq!(f.cells(), &[c("1A"), c("4D"), c("2A"), c("1B")]);
    }

    #[test]
    fn specs_without_two_cells_are_dropped() {
        let footprints = parse_ships("1A, 1A 2A 3A, 1J 2A, 4C 4D", 10).unwrap();
        assert_eq!(footprints.len(), 1);
        assert_eq!(footprints[0].anchor(), c("4C"));
    }

    #[test]
    fn out_of_range_inside_a_dropped_spec_still_fails() {
        assert!(parse_ships("1A 2A 11A", 10).is_err());
    }

    #[test]
    fn anchor_collision_is_rejected() {
        let mut board = Board::new(10);
        place_ships(&mut board, "1A 1B").unwrap();
        let err = place_ships(&mut board, "1A 2A").unwrap_err();
        assert_eq!(err, GameError::bad_request("Ship has been added already."));
    }

    #[test]
    fn diagonal_on_last_column_does_not_fit() {
        let mut board = Board::new(10);
        assert!(place_ships(&mut board, "1K 2I").is_err());
    }
}
