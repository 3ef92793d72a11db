//! Herald Core
//!
//! Central coordination layer for the Herald broadcast service: wires the
//! messaging client, the session monitor, and the dispatcher behind one
//! facade the HTTP surface talks to.

mod config;
mod error;
mod herald;

pub use config::{ClientMode, Config};
pub use error::CoreError;
pub use herald::{BroadcastRequest, CampaignReport, Herald};

// Re-export core components
pub use herald_client::{
    ChatClient, ClientError, ClientHandle, DryRunClient, GatewayClient, GroupChat, SessionEvent,
};
pub use herald_dispatch::{
    compose, BroadcastDispatcher, Campaign, DeliveryMode, DispatchError, DispatcherConfig,
    MessageTemplate, PacingPolicy, SendOutcome,
};
pub use herald_session::{SessionMonitor, SessionState, SessionStatus};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
