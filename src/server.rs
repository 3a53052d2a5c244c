#![cfg(feature = "std")]

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::session::SessionHandle;
use crate::skeleton::Skeleton;
use crate::transport::tcp::TcpTransport;

/// How long a connection may sit idle between requests before it is dropped.
pub const CONNECTION_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Accept connections forever, serving each on its own task against one shared session.
pub async fn serve(listener: TcpListener, session: SessionHandle) -> anyhow::Result<()> {
    info!("listening on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        info!("client connected from {}", addr);
        let transport = TcpTransport::with_timeout(stream, CONNECTION_IDLE_TIMEOUT);
        let engine = session.clone();
        tokio::spawn(async move {
            let mut skeleton = Skeleton::new(engine, transport);
            match skeleton.run().await {
                Ok(()) => info!("client {} disconnected", addr),
                Err(e) => warn!("client {} dropped: {}", addr, e),
            }
        });
    }
}
