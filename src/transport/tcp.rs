use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for a single send or receive (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (64 KiB); requests are short text specs.
pub const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

/// Length-prefixed bincode frames over a TCP stream.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
    shutdown: Arc<AtomicBool>,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE)
    }

    /// Wait at most `timeout_duration` per send or receive.
    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, MAX_MESSAGE_SIZE)
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_message_size: u32) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Request graceful shutdown of the transport.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

fn write_error(e: io::Error) -> anyhow::Error {
    match e.kind() {
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("Write error: {}", e),
    }
}

fn read_error(e: io::Error) -> anyhow::Error {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        io::ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if self.is_shutdown() {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }

        let send_op = async {
            let data = bincode::serialize(&msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
            if data.len() as u64 > self.max_message_size as u64 {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    data.len(),
                    self.max_message_size
                ));
            }
            let len = (data.len() as u32).to_be_bytes();
            self.stream.write_all(&len).await.map_err(write_error)?;
            self.stream.write_all(&data).await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        if self.is_shutdown() {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }

        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream.read_exact(&mut len_buf).await.map_err(read_error)?;

            let len = u32::from_be_bytes(len_buf);
            if len > self.max_message_size {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    self.max_message_size
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            self.stream.read_exact(&mut buf).await.map_err(read_error)?;

            let msg = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };

        timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }
}
