//! Shot resolution: one shot may name several cells and damage several ships.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::common::GameError;
use super::config::LIST_SEPARATOR;
use super::coordinate::{parse_list, Coordinate};
use super::grid::Board;
use super::ship::{ShipId, ShipState};
use super::statistic::GameStatistic;

/// Outcome of exactly one shot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub destroyed: bool,
    pub knocked: bool,
    pub game_ended: bool,
}

/// States of the ships a shot touched, in the order they were first hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShotOutcome {
    affected: Vec<(ShipId, ShipState)>,
}

impl ShotOutcome {
    pub fn affected(&self) -> &[(ShipId, ShipState)] {
        &self.affected
    }

    pub fn is_miss(&self) -> bool {
        self.affected.is_empty()
    }

    /// Combine the touched ships with statistics taken after the shot.
    pub fn into_result(self, stats: &GameStatistic) -> ShotResult {
        let mut result = ShotResult {
            game_ended: stats.is_finished(),
            ..ShotResult::default()
        };
        if !self.is_miss() {
            result.destroyed = self
                .affected
                .iter()
                .all(|(_, s)| *s == ShipState::Destroyed);
            result.knocked =
                result.destroyed || self.affected.iter().any(|(_, s)| *s == ShipState::Knocked);
        }
        result
    }
}

/// Parse the cells of a shot for a `range`-sized board.
pub fn parse_shot(spec: &str, range: usize) -> Result<Vec<Coordinate>, GameError> {
    parse_list(spec, LIST_SEPARATOR, range)
}

/// Damage every ship under `cells`.
///
/// Stops at the first cell that was already hit; damage dealt before that cell
/// stays on the board.
pub fn apply(board: &mut Board, cells: &[Coordinate]) -> Result<ShotOutcome, GameError> {
    let mut seen = BTreeSet::new();
    let mut order = Vec::new();
    for &c in cells {
        let Some(id) = board.ship_at(c) else {
            continue;
        };
        if seen.insert(id) {
            order.push(id);
        }
        if let Some(ship) = board.ship_mut(id) {
            ship.damage(c)?;
        }
    }
    let affected = order
        .into_iter()
        .filter_map(|id| board.ship(id).map(|s| (id, s.state())))
        .collect();
    Ok(ShotOutcome { affected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::ShipError;
    use crate::core::placement::place_ships;

    fn board(spec: &str) -> Board {
        let mut board = Board::new(10);
        place_ships(&mut board, spec).unwrap();
        board
    }

    #[test]
    fn multi_cell_shot_sinks_a_block() {
        let mut board = board("1A 2B");
        let cells = parse_shot("1A, 2A, 2B, 1B", 10).unwrap();
        let outcome = apply(&mut board, &cells).unwrap();
        assert_eq!(outcome.affected().len(), 1);
        let stats = GameStatistic::collect(Some(&board), 1);
        assert_eq!(
            outcome.into_result(&stats),
            ShotResult { destroyed: true, knocked: true, game_ended: true }
        );
    }

    #[test]
    fn mixed_outcome_is_knocked_not_destroyed() {
        let mut board = board("1A 1B, 5E 5F");
        let cells = parse_shot("1A, 1B, 5E", 10).unwrap();
        let outcome = apply(&mut board, &cells).unwrap();
        let stats = GameStatistic::collect(Some(&board), 1);
        assert_eq!(
            outcome.into_result(&stats),
            ShotResult { destroyed: false, knocked: true, game_ended: false }
        );
    }

    #[test]
    fn repeated_cell_in_one_shot_is_fatal() {
        let mut board = board("1A 1B");
        let cells = parse_shot("1A, 1A", 10).unwrap();
        let err = apply(&mut board, &cells).unwrap_err();
        assert_eq!(err, GameError::Fatal(ShipError::AlreadyHit(Coordinate::new(0, 0))));
        let stats = GameStatistic::collect(Some(&board), 1);
        assert_eq!(stats.knocked, 1);
    }

    #[test]
    fn miss_reports_nothing() {
        let mut board = board("1A 1B");
        let outcome = apply(&mut board, &parse_shot("7C", 10).unwrap()).unwrap();
        assert!(outcome.is_miss());
        let stats = GameStatistic::collect(Some(&board), 1);
        assert_eq!(outcome.into_result(&stats), ShotResult::default());
    }
}
