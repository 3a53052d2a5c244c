#![cfg(feature = "std")]

//! The single game session and its async handle.
//!
//! [`GameSession`] owns the board behind one mutex. Phase transitions and the
//! damage loop of a shot run under it; the shot counter is a separate atomic
//! bumped before any validation, and the "game is finished" check reads
//! statistics in its own short critical section. Two shots can therefore both
//! pass that check before either lands.

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::core::config::{MAX_RANGE, MIN_RANGE};
use crate::core::{placement, shot, Board, GameError, GameStatistic, ShotResult};
use crate::protocol::GameApi;

/// Board lifecycle. `AwaitingShips` accepts one placement, `Ready` accepts shots.
#[derive(Debug)]
enum Phase {
    NotStarted,
    AwaitingShips(Board),
    Ready(Board),
}

impl Phase {
    fn board(&self) -> Option<&Board> {
        match self {
            Phase::NotStarted => None,
            Phase::AwaitingShips(b) | Phase::Ready(b) => Some(b),
        }
    }

    fn board_mut(&mut self) -> Option<&mut Board> {
        match self {
            Phase::NotStarted => None,
            Phase::AwaitingShips(b) | Phase::Ready(b) => Some(b),
        }
    }
}

/// Public view of the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    AwaitingShips,
    Ready,
    /// Ready with every ship destroyed.
    Finished,
}

#[derive(Debug)]
pub struct GameSession {
    phase: Mutex<Phase>,
    shot_count: AtomicUsize,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::NotStarted),
            shot_count: AtomicUsize::new(0),
        }
    }

    // Errors never panic while the lock is held, so a poisoned lock still holds a
    // consistent phase.
    fn lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate a fresh `range`×`range` board. Does nothing if a game is active.
    pub fn start(&self, range: i64) -> Result<(), GameError> {
        let range = validate_range(range)?;
        let mut phase = self.lock();
        if phase.board().is_some() {
            debug!("start ignored: a game is already active");
            return Ok(());
        }
        self.begin(&mut phase, range);
        Ok(())
    }

    fn begin(&self, phase: &mut Phase, range: usize) {
        self.shot_count.store(0, Ordering::SeqCst);
        *phase = Phase::AwaitingShips(Board::new(range));
        info!("game started on a {}x{} board", range, range);
    }

    /// Discard the board. Never fails.
    pub fn end(&self) {
        let mut phase = self.lock();
        *phase = Phase::NotStarted;
        info!("game ended");
    }

    /// End and start again with the same range, leaving an empty board.
    fn restart(&self, phase: &mut Phase, range: usize) {
        *phase = Phase::NotStarted;
        self.begin(phase, range);
    }

    /// Place every ship described by `spec`.
    ///
    /// Ignored unless the session is waiting for ships. Any failure wipes the board
    /// back to an empty one before the error is returned.
    pub fn add_ships(&self, spec: &str) -> Result<(), GameError> {
        if spec.is_empty() {
            return Err(GameError::bad_request("coordinates is required."));
        }
        let mut phase = self.lock();
        let mut board = match mem::replace(&mut *phase, Phase::NotStarted) {
            Phase::AwaitingShips(board) => board,
            other => {
                debug!("add_ships ignored in phase {:?}", SessionState::from(&other));
                *phase = other;
                return Ok(());
            }
        };
        let range = board.range();
        match placement::place_ships(&mut board, spec) {
            Ok(ids) => {
                info!("placed {} ships", ids.len());
                *phase = Phase::Ready(board);
                Ok(())
            }
            Err(e) => {
                warn!("placement failed, restarting board: {}", e);
                self.restart(&mut phase, range);
                Err(e)
            }
        }
    }

    /// Fire one shot at every cell in `spec`.
    pub fn shoot(&self, spec: &str) -> Result<ShotResult, GameError> {
        let number = self.shot_count.fetch_add(1, Ordering::SeqCst) + 1;
        if spec.is_empty() {
            return Err(GameError::bad_request("coordinates is required."));
        }
        if self.statistic().is_finished() {
            return Err(GameError::invalid_state("Game is finished."));
        }
        let range = self
            .range()
            .ok_or_else(|| GameError::invalid_state("Game is not started."))?;
        let cells = shot::parse_shot(spec, range)?;

        let outcome = {
            let mut phase = self.lock();
            let board = phase
                .board_mut()
                .ok_or_else(|| GameError::invalid_state("Game is not started."))?;
            shot::apply(board, &cells).map_err(|e| {
                error!("shot #{} at {:?} failed: {}", number, spec, e);
                e
            })?
        };

        let result = outcome.into_result(&self.statistic());
        debug!("shot #{} at {:?}: {:?}", number, spec, result);
        Ok(result)
    }

    /// Current statistics; all zeros without an active game.
    pub fn statistic(&self) -> GameStatistic {
        let phase = self.lock();
        GameStatistic::collect(phase.board(), self.shot_count.load(Ordering::SeqCst))
    }

    /// Board dimension of the active game.
    pub fn range(&self) -> Option<usize> {
        self.lock().board().map(Board::range)
    }

    pub fn state(&self) -> SessionState {
        let phase = self.lock();
        let state = SessionState::from(&*phase);
        if state == SessionState::Ready
            && GameStatistic::collect(phase.board(), 0).is_finished()
        {
            SessionState::Finished
        } else {
            state
        }
    }
}

impl From<&Phase> for SessionState {
    fn from(phase: &Phase) -> Self {
        match phase {
            Phase::NotStarted => SessionState::NotStarted,
            Phase::AwaitingShips(_) => SessionState::AwaitingShips,
            Phase::Ready(_) => SessionState::Ready,
        }
    }
}

fn validate_range(range: i64) -> Result<usize, GameError> {
    if range < MIN_RANGE as i64 || range > MAX_RANGE as i64 {
        return Err(GameError::bad_request(format!(
            "Matrix range is outside of boundaries. Max range is {}.",
            MAX_RANGE
        )));
    }
    Ok(range as usize)
}

/// Shared handle to a [`GameSession`] that runs every operation on the blocking
/// pool, so lock waits never stall the async runtime.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    session: Arc<GameSession>,
}

impl SessionHandle {
    pub fn new(session: GameSession) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    async fn submit<T, F>(&self, work: F) -> anyhow::Result<T>
    where
        F: FnOnce(&GameSession) -> Result<T, GameError> + Send + 'static,
        T: Send + 'static,
    {
        let session = Arc::clone(&self.session);
        let result = tokio::task::spawn_blocking(move || work(&session))
            .await
            .map_err(|e| GameError::Internal(format!("session worker failed: {}", e)))?;
        Ok(result?)
    }
}

#[async_trait::async_trait]
impl GameApi for SessionHandle {
    async fn start(&self, range: i64) -> anyhow::Result<()> {
        self.submit(move |s| s.start(range)).await
    }

    async fn end(&self) -> anyhow::Result<()> {
        self.submit(|s| {
            s.end();
            Ok(())
        })
        .await
    }

    async fn add_ships(&self, spec: &str) -> anyhow::Result<()> {
        let spec = spec.to_owned();
        self.submit(move |s| s.add_ships(&spec)).await
    }

    async fn shoot(&self, spec: &str) -> anyhow::Result<ShotResult> {
        let spec = spec.to_owned();
        self.submit(move |s| s.shoot(&spec)).await
    }

    async fn statistic(&self) -> anyhow::Result<GameStatistic> {
        self.submit(|s| Ok(s.statistic())).await
    }
}
