//! Herald Messaging Client
//!
//! The narrow capability interface over the external messaging-session
//! client, plus the concrete adapters Herald ships with. The session
//! protocol itself (login handshake, transport, encryption) lives in the
//! external gateway process and is never reimplemented here.

mod client;
mod dry_run;
mod error;
mod event;
mod gateway;

pub use client::{ChatClient, ClientHandle, GroupChat};
pub use dry_run::DryRunClient;
pub use error::ClientError;
pub use event::SessionEvent;
pub use gateway::GatewayClient;

pub type Result<T> = std::result::Result<T, ClientError>;
