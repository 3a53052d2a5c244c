#![cfg(feature = "std")]

use serde::{Deserialize, Serialize};

use crate::core::{ErrorKind, GameError, GameStatistic, ShotResult};

/// Wire protocol version exchanged in the handshake.
pub const PROTOCOL_VERSION: u8 = 1;

/// Messages exchanged between the game service and a remote client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Handshake, sent first by the client and echoed by the server.
    Hello { version: u8 },
    /// Start a game on a `range`×`range` board.
    Start { range: i64 },
    /// Discard the current game.
    End,
    /// Place ships from a comma-separated list of endpoint pairs.
    AddShips { spec: String },
    /// Fire at a comma-separated list of cells.
    Shoot { spec: String },
    /// Request current statistics.
    StatisticReq,
    /// Generic acknowledgement.
    Ack,
    /// Response carrying the result of a shot.
    ShotResp(ShotResult),
    /// Response carrying statistics.
    StatisticResp(GameStatistic),
    /// A request failed.
    Error { kind: ErrorKind, message: String },
}

impl Message {
    /// Wire form of a failed request.
    pub fn error(err: &anyhow::Error) -> Self {
        Message::Error {
            kind: ErrorKind::of(err),
            message: err.to_string(),
        }
    }

    /// Turn an `Error` reply back into a typed error callers can match on.
    pub fn into_error(self) -> anyhow::Error {
        match self {
            Message::Error { kind, message } => GameError::from_kind(kind, message).into(),
            other => anyhow::anyhow!("Unexpected message: {:?}", other),
        }
    }
}

/// The five operations of a game session, local or remote.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn start(&self, range: i64) -> anyhow::Result<()>;
    async fn end(&self) -> anyhow::Result<()>;
    async fn add_ships(&self, spec: &str) -> anyhow::Result<()>;
    async fn shoot(&self, spec: &str) -> anyhow::Result<ShotResult>;
    async fn statistic(&self) -> anyhow::Result<GameStatistic>;
}
