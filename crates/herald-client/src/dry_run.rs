//! Dry-run client
//!
//! Accepts every send and logs it instead of delivering. Lets the service
//! run end to end without a gateway process attached.

use async_trait::async_trait;

use crate::client::{ChatClient, GroupChat};
use crate::Result;

#[derive(Debug, Default)]
pub struct DryRunClient;

#[async_trait]
impl ChatClient for DryRunClient {
    async fn is_ready(&self) -> bool {
        true
    }

    async fn send_text(&self, destination: &str, text: &str) -> Result<()> {
        tracing::info!(
            destination = %destination,
            chars = text.len(),
            "Dry-run text delivery"
        );
        Ok(())
    }

    async fn send_image(
        &self,
        destination: &str,
        image: &[u8],
        filename: &str,
        _caption: &str,
    ) -> Result<()> {
        tracing::info!(
            destination = %destination,
            filename = %filename,
            bytes = image.len(),
            "Dry-run image delivery"
        );
        Ok(())
    }

    async fn list_group_chats(&self) -> Result<Vec<GroupChat>> {
        Ok(Vec::new())
    }
}
