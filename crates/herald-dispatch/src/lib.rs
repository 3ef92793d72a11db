//! Herald Broadcast Dispatch
//!
//! Delivers one composed message to a list of chat-group destinations:
//! - Strictly sequential sends with randomized inter-send pacing
//! - Per-destination error isolation; one failure never aborts a campaign
//! - Graceful degradation from image to text delivery

mod compose;
mod destination;
mod dispatcher;
mod error;
mod fetch;
mod outcome;
mod pacing;

pub use compose::{compose, MessageTemplate};
pub use destination::{normalize, normalize_all, GROUP_SUFFIX};
pub use dispatcher::{BroadcastDispatcher, Campaign, DispatcherConfig};
pub use error::DispatchError;
pub use fetch::{fetch_image, FetchError, ImagePayload};
pub use outcome::{fallback_rungs, DeliveryMode, SendOutcome};
pub use pacing::PacingPolicy;

pub type Result<T> = std::result::Result<T, DispatchError>;
