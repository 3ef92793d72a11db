//! HTTP adapter for the session gateway
//!
//! The gateway is the local process that owns the real messaging session.
//! This adapter speaks its JSON API; lifecycle events travel the other way,
//! over the gateway's webhook into the server's event channel.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::client::{ChatClient, GroupChat};
use crate::error::ClientError;
use crate::Result;

#[derive(Serialize)]
struct TextRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    chat_id: &'a str,
    filename: &'a str,
    caption: &'a str,
    /// Image bytes, base64-encoded
    image: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    ready: bool,
}

pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Build an adapter against `base_url` with a fixed request timeout.
    ///
    /// The timeout is the only delivery bound Herald has; a gateway that
    /// never answers fails a send here rather than stalling forever.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map a gateway response to success or a classified rejection.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response.text().await.unwrap_or_default();
        Err(ClientError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl ChatClient for GatewayClient {
    async fn is_ready(&self) -> bool {
        let response = match self.http.get(self.endpoint("status")).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "Gateway status probe failed");
                return false;
            }
        };

        match response.json::<StatusResponse>().await {
            Ok(s) => s.ready,
            Err(e) => {
                tracing::debug!(error = %e, "Gateway status response unreadable");
                false
            }
        }
    }

    async fn send_text(&self, destination: &str, text: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("send/text"))
            .json(&TextRequest {
                chat_id: destination,
                text,
            })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn send_image(
        &self,
        destination: &str,
        image: &[u8],
        filename: &str,
        caption: &str,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("send/image"))
            .json(&ImageRequest {
                chat_id: destination,
                filename,
                caption,
                image: BASE64.encode(image),
            })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn list_group_chats(&self) -> Result<Vec<GroupChat>> {
        let response = self.http.get(self.endpoint("groups")).send().await?;
        let response = Self::check(response).await?;

        response
            .json::<Vec<GroupChat>>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
