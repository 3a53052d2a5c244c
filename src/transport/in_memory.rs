use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::yield_now;

use crate::protocol::Message;
use crate::transport::Transport;

/// Queue-backed transport pair for tests and in-process clients.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<Message>>>,
    send_queue: Arc<Mutex<VecDeque<Message>>>,
    shutdown: AtomicBool,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
                shutdown: AtomicBool::new(false),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
                shutdown: AtomicBool::new(false),
            },
        )
    }

    /// Refuse further sends and receives on this end.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if self.is_shutdown() {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(anyhow::anyhow!("Channel closed"));
        }
        let mut queue = self.send_queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.push_back(msg);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            if self.is_shutdown() {
                return Err(anyhow::anyhow!("Transport is shut down"));
            }
            if let Some(msg) = {
                let mut queue = self.recv_queue.lock().unwrap_or_else(PoisonError::into_inner);
                queue.pop_front()
            } {
                return Ok(msg);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}
