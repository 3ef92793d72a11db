//! Messaging client capability interface

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A group chat the client can address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupChat {
    /// Provider-assigned chat identifier
    pub id: String,
    /// Human-readable group name
    pub name: String,
}

/// The capability Herald consumes from the external messaging session.
///
/// Implementations own their transport configuration, including request
/// timeouts; callers never add a timeout layer on top of a send.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Whether the underlying session reports itself ready to send.
    async fn is_ready(&self) -> bool;

    /// Deliver a plain text message to one destination.
    async fn send_text(&self, destination: &str, text: &str) -> Result<()>;

    /// Deliver an image with a caption to one destination.
    async fn send_image(
        &self,
        destination: &str,
        image: &[u8],
        filename: &str,
        caption: &str,
    ) -> Result<()>;

    /// List the group chats the session participates in.
    async fn list_group_chats(&self) -> Result<Vec<GroupChat>>;
}

/// Shared handle to the single client instance for the process.
pub type ClientHandle = Arc<dyn ChatClient>;
