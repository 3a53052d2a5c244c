#![cfg(feature = "std")]

use anyhow::anyhow;
use log::{debug, warn};

use crate::core::GameError;
use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Serves one connection: handshake, then one reply per request until the peer
/// goes away. Request failures are reported to the peer and do not end the loop.
pub struct Skeleton<E: GameApi, T: Transport> {
    engine: E,
    transport: T,
}

impl<E: GameApi, T: Transport> Skeleton<E, T> {
    pub fn new(engine: E, transport: T) -> Self {
        Self { engine, transport }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello { version: PROTOCOL_VERSION })
                    .await?;
            }
            Message::Hello { version } => {
                return Err(anyhow!(
                    "Unsupported protocol version {} (expected {})",
                    version,
                    PROTOCOL_VERSION
                ))
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        while let Ok(msg) = self.transport.recv().await {
            let reply = self.dispatch(msg).await;
            self.transport.send(reply).await?;
        }
        Ok(())
    }

    async fn dispatch(&self, msg: Message) -> Message {
        debug!("request {:?}", msg);
        let reply = match msg {
            Message::Start { range } => self.engine.start(range).await.map(|()| Message::Ack),
            Message::End => self.engine.end().await.map(|()| Message::Ack),
            Message::AddShips { spec } => {
                self.engine.add_ships(&spec).await.map(|()| Message::Ack)
            }
            Message::Shoot { spec } => self.engine.shoot(&spec).await.map(Message::ShotResp),
            Message::StatisticReq => self.engine.statistic().await.map(Message::StatisticResp),
            other => Err(GameError::bad_request(format!("Unexpected message: {:?}", other)).into()),
        };
        reply.unwrap_or_else(|e| {
            warn!("request failed: {}", e);
            Message::error(&e)
        })
    }
}
