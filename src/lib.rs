#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{GameApi, Message, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use session::{GameSession, SessionHandle, SessionState};
#[cfg(feature = "std")]
pub use skeleton::Skeleton;
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::tcp::TcpTransport;
