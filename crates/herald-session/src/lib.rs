//! Herald Session Tracking
//!
//! A single authoritative view of the external messaging session:
//! - Driven purely by push events from the external client
//! - Read as a non-blocking snapshot, never awaited
//! - Lives for the process lifetime; nothing is persisted

mod artifact;
mod monitor;
mod status;

pub use artifact::render_challenge;
pub use monitor::SessionMonitor;
pub use status::{SessionState, SessionStatus};
