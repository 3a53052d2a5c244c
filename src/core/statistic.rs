use super::grid::Board;
use super::ship::ShipState;

/// Aggregate view of a game, derived from the board on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStatistic {
    pub ship_count: usize,
    pub destroyed: usize,
    pub knocked: usize,
    pub shot_count: usize,
}

impl GameStatistic {
    /// Count the ships still referenced by the board. No board means no game,
    /// which reports all zeros regardless of `shot_count`.
    pub fn collect(board: Option<&Board>, shot_count: usize) -> Self {
        let Some(board) = board else {
            return GameStatistic::default();
        };
        let mut stats = GameStatistic {
            shot_count,
            ..GameStatistic::default()
        };
        for ship in board.ships_on_grid() {
            stats.ship_count += 1;
            match ship.state() {
                ShipState::Destroyed => stats.destroyed += 1,
                ShipState::Knocked => stats.knocked += 1,
                ShipState::Intact => {}
            }
        }
        stats
    }

    /// Every ship on the board is destroyed. Holds trivially for an empty board.
    pub fn is_finished(&self) -> bool {
        self.ship_count == self.destroyed
    }
}
