#![cfg(feature = "std")]

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::core::{GameStatistic, ShotResult};
use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Remote [`GameApi`] speaking the wire protocol over a transport.
///
/// Errors reported by the server come back as [`GameError`](crate::core::GameError)
/// values, so `ErrorKind::of` classifies them the same way as local ones.
pub struct Stub<T: Transport> {
    transport: Mutex<T>,
    handshaken: AtomicBool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            handshaken: AtomicBool::new(false),
        }
    }

    async fn ensure_handshake(&self, transport: &mut T) -> anyhow::Result<()> {
        if self.handshaken.load(Ordering::SeqCst) {
            return Ok(());
        }
        transport
            .send(Message::Hello { version: PROTOCOL_VERSION })
            .await?;
        match transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken.store(true, Ordering::SeqCst);
                Ok(())
            }
            other => Err(anyhow::anyhow!("Unexpected handshake reply: {:?}", other)),
        }
    }

    /// Send one request and wait for its reply. `Error` replies become `Err`.
    async fn request(&self, msg: Message) -> anyhow::Result<Message> {
        let mut transport = self.transport.lock().await;
        self.ensure_handshake(&mut transport).await?;
        transport.send(msg).await?;
        match transport.recv().await? {
            err @ Message::Error { .. } => Err(err.into_error()),
            reply => Ok(reply),
        }
    }

    async fn expect_ack(&self, msg: Message) -> anyhow::Result<()> {
        match self.request(msg).await? {
            Message::Ack => Ok(()),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for Stub<T> {
    async fn start(&self, range: i64) -> anyhow::Result<()> {
        self.expect_ack(Message::Start { range }).await
    }

    async fn end(&self) -> anyhow::Result<()> {
        self.expect_ack(Message::End).await
    }

    async fn add_ships(&self, spec: &str) -> anyhow::Result<()> {
        self.expect_ack(Message::AddShips { spec: spec.to_owned() }).await
    }

    async fn shoot(&self, spec: &str) -> anyhow::Result<ShotResult> {
        match self.request(Message::Shoot { spec: spec.to_owned() }).await? {
            Message::ShotResp(result) => Ok(result),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }

    async fn statistic(&self) -> anyhow::Result<GameStatistic> {
        match self.request(Message::StatisticReq).await? {
            Message::StatisticResp(stats) => Ok(stats),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }
}
