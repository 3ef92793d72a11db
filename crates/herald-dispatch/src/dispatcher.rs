//! Broadcast dispatcher
//!
//! One campaign at a time, destinations strictly in caller order. Two
//! concurrent campaigns pace themselves independently; the external client
//! is the serialization point if any exists.

use std::time::Duration;

use url::Url;
use uuid::Uuid;

use herald_client::ClientHandle;
use herald_session::SessionMonitor;

use crate::destination;
use crate::error::DispatchError;
use crate::fetch::{fetch_image, ImagePayload};
use crate::outcome::{fallback_rungs, DeliveryMode, SendOutcome};
use crate::pacing::PacingPolicy;
use crate::Result;

/// One broadcast request, built per call and never persisted.
#[derive(Debug, Clone)]
pub struct Campaign {
    /// Correlation ID for logs
    pub id: Uuid,
    /// Final composed message text
    pub text: String,
    /// Optional image to fetch and attach
    pub image_source: Option<Url>,
    /// Raw destination identifiers, normalized at dispatch time
    pub destinations: Vec<String>,
}

impl Campaign {
    pub fn new(text: String, image_source: Option<Url>, destinations: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            image_source,
            destinations,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub pacing: PacingPolicy,
    /// Bound on the campaign image fetch
    pub image_timeout: Duration,
    /// Payloads under this size are treated as not-an-image
    pub min_image_bytes: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pacing: PacingPolicy::default(),
            image_timeout: Duration::from_secs(15),
            min_image_bytes: 512,
        }
    }
}

pub struct BroadcastDispatcher {
    client: ClientHandle,
    monitor: SessionMonitor,
    http: reqwest::Client,
    config: DispatcherConfig,
}

impl BroadcastDispatcher {
    pub fn new(client: ClientHandle, monitor: SessionMonitor, config: DispatcherConfig) -> Self {
        Self {
            client,
            monitor,
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Deliver one campaign to every destination, sequentially.
    ///
    /// Fails only on the two preconditions (session not connected, nothing
    /// to send to); every later failure is absorbed into that
    /// destination's outcome and the loop continues. Returns one outcome
    /// per normalized destination, in input order, duplicates included.
    pub async fn dispatch(&self, campaign: &Campaign) -> Result<Vec<SendOutcome>> {
        if !self.monitor.current_status().connected {
            return Err(DispatchError::NotReady);
        }

        let destinations = destination::normalize_all(&campaign.destinations);
        if destinations.is_empty() {
            return Err(DispatchError::NoDestinations);
        }

        let image = self.resolve_image(campaign).await;

        tracing::info!(
            campaign_id = %campaign.id,
            destinations = destinations.len(),
            with_image = image.is_some(),
            "Campaign started"
        );

        let mut outcomes = Vec::with_capacity(destinations.len());
        for dest in &destinations {
            tokio::time::sleep(self.config.pacing.pre_send_delay()).await;

            let outcome = self.deliver_one(dest, &campaign.text, image.as_ref()).await;
            if let Some(reason) = &outcome.failure_reason {
                tracing::warn!(
                    campaign_id = %campaign.id,
                    destination = %dest,
                    reason = %reason,
                    "Delivery failed"
                );
            }
            outcomes.push(outcome);

            tokio::time::sleep(self.config.pacing.post_send_delay()).await;
        }

        tracing::info!(
            campaign_id = %campaign.id,
            delivered = outcomes.iter().filter(|o| o.delivered).count(),
            failed = outcomes.iter().filter(|o| !o.delivered).count(),
            "Campaign finished"
        );

        Ok(outcomes)
    }

    /// Resolve the campaign image once, up front.
    ///
    /// Any fetch failure degrades the whole campaign to text-only; there
    /// is no per-destination retry of the fetch.
    async fn resolve_image(&self, campaign: &Campaign) -> Option<ImagePayload> {
        let url = campaign.image_source.as_ref()?;

        match fetch_image(
            &self.http,
            url,
            self.config.image_timeout,
            self.config.min_image_bytes,
        )
        .await
        {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(
                    campaign_id = %campaign.id,
                    url = %url,
                    error = %e,
                    "Image unavailable, campaign degrades to text"
                );
                None
            }
        }
    }

    /// Walk the fallback ladder for one destination; first success wins.
    async fn deliver_one(
        &self,
        destination: &str,
        text: &str,
        image: Option<&ImagePayload>,
    ) -> SendOutcome {
        let mut outcome =
            SendOutcome::failed(destination, DeliveryMode::Text, "nothing attempted".to_string());

        for &mode in fallback_rungs(image.is_some()) {
            match self.attempt(mode, destination, text, image).await {
                Ok(()) => return SendOutcome::delivered(destination, mode),
                Err(e) => {
                    tracing::debug!(
                        destination = %destination,
                        mode = %mode,
                        error = %e,
                        "Delivery rung failed"
                    );
                    outcome = SendOutcome::failed(destination, mode, e.to_string());
                }
            }
        }

        outcome
    }

    async fn attempt(
        &self,
        mode: DeliveryMode,
        destination: &str,
        text: &str,
        image: Option<&ImagePayload>,
    ) -> herald_client::Result<()> {
        match (mode, image) {
            (DeliveryMode::Image, Some(payload)) => {
                self.client
                    .send_image(destination, &payload.bytes, &payload.filename, text)
                    .await
            }
            _ => self.client.send_text(destination, text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use herald_client::{ChatClient, ClientError, GroupChat, SessionEvent};

    /// Scripted client: records every send, fails where told to.
    #[derive(Default)]
    struct MockClient {
        text_calls: AtomicUsize,
        image_calls: AtomicUsize,
        sent: Mutex<Vec<(String, DeliveryMode)>>,
        fail_text_for: Vec<String>,
        fail_image_for: Vec<String>,
    }

    impl MockClient {
        fn rejection() -> ClientError {
            ClientError::Rejected {
                status: 500,
                detail: "scripted failure".to_string(),
            }
        }

        fn sent_log(&self) -> Vec<(String, DeliveryMode)> {
            self.sent.lock().unwrap().clone()
        }

        fn total_calls(&self) -> usize {
            self.text_calls.load(Ordering::SeqCst) + self.image_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatClient for MockClient {
        async fn is_ready(&self) -> bool {
            true
        }

        async fn send_text(&self, destination: &str, _text: &str) -> herald_client::Result<()> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_text_for.iter().any(|d| d == destination) {
                return Err(Self::rejection());
            }
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), DeliveryMode::Text));
            Ok(())
        }

        async fn send_image(
            &self,
            destination: &str,
            _image: &[u8],
            _filename: &str,
            _caption: &str,
        ) -> herald_client::Result<()> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_image_for.iter().any(|d| d == destination) {
                return Err(Self::rejection());
            }
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), DeliveryMode::Image));
            Ok(())
        }

        async fn list_group_chats(&self) -> herald_client::Result<Vec<GroupChat>> {
            Ok(Vec::new())
        }
    }

    fn connected_monitor() -> SessionMonitor {
        let monitor = SessionMonitor::new();
        monitor.apply(SessionEvent::Connected);
        monitor
    }

    fn test_config() -> DispatcherConfig {
        DispatcherConfig {
            pacing: PacingPolicy::zero(),
            ..DispatcherConfig::default()
        }
    }

    fn dispatcher(client: Arc<MockClient>, monitor: SessionMonitor) -> BroadcastDispatcher {
        BroadcastDispatcher::new(client, monitor, test_config())
    }

    fn text_campaign(destinations: &[&str]) -> Campaign {
        Campaign::new(
            "Sale".to_string(),
            None,
            destinations.iter().map(|d| d.to_string()).collect(),
        )
    }

    fn image_payload() -> ImagePayload {
        ImagePayload {
            bytes: vec![0u8; 2048],
            filename: "sale.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_outcome_per_destination_in_order() {
        let client = Arc::new(MockClient::default());
        let d = dispatcher(client.clone(), connected_monitor());

        // Duplicate entries are kept, not deduplicated
        let campaign = text_campaign(&["123", "456@g.us", "123"]);
        let outcomes = d.dispatch(&campaign).await.unwrap();

        let expected = ["123@g.us", "456@g.us", "123@g.us"];
        assert_eq!(outcomes.len(), 3);
        for (outcome, dest) in outcomes.iter().zip(expected) {
            assert_eq!(outcome.destination, dest);
            assert!(outcome.delivered);
            assert_eq!(outcome.mode, DeliveryMode::Text);
        }

        let log: Vec<String> = client.sent_log().into_iter().map(|(d, _)| d).collect();
        assert_eq!(log, expected);
    }

    #[tokio::test]
    async fn test_not_ready_sends_nothing() {
        let client = Arc::new(MockClient::default());
        // Monitor never saw a connected event
        let d = dispatcher(client.clone(), SessionMonitor::new());

        let result = d.dispatch(&text_campaign(&["123"])).await;

        assert_eq!(result.unwrap_err(), DispatchError::NotReady);
        assert_eq!(client.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_after_normalization_is_an_error() {
        let client = Arc::new(MockClient::default());
        let d = dispatcher(client.clone(), connected_monitor());

        let result = d.dispatch(&text_campaign(&["  ", ""])).await;

        assert_eq!(result.unwrap_err(), DispatchError::NoDestinations);
        assert_eq!(client.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_destination() {
        let client = Arc::new(MockClient {
            fail_text_for: vec!["456@g.us".to_string()],
            ..MockClient::default()
        });
        let d = dispatcher(client.clone(), connected_monitor());

        let campaign = text_campaign(&["123", "456", "789"]);
        let outcomes = d.dispatch(&campaign).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].delivered);
        assert!(!outcomes[1].delivered);
        assert!(outcomes[1].failure_reason.is_some());
        // The failure did not abort the rest of the campaign
        assert!(outcomes[2].delivered);
    }

    #[tokio::test]
    async fn test_image_failure_falls_back_to_text() {
        let client = Arc::new(MockClient {
            fail_image_for: vec!["123@g.us".to_string()],
            ..MockClient::default()
        });
        let d = dispatcher(client.clone(), connected_monitor());

        let payload = image_payload();
        let outcome = d.deliver_one("123@g.us", "Sale", Some(&payload)).await;

        assert!(outcome.delivered);
        assert_eq!(outcome.mode, DeliveryMode::Text);
        assert_eq!(client.image_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.text_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_image_delivery_when_payload_present() {
        let client = Arc::new(MockClient::default());
        let d = dispatcher(client.clone(), connected_monitor());

        let payload = image_payload();
        let outcome = d.deliver_one("123@g.us", "Sale", Some(&payload)).await;

        assert!(outcome.delivered);
        assert_eq!(outcome.mode, DeliveryMode::Image);
        // Text rung never reached
        assert_eq!(client.text_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_both_rungs_failing_records_last_rung() {
        let client = Arc::new(MockClient {
            fail_image_for: vec!["123@g.us".to_string()],
            fail_text_for: vec!["123@g.us".to_string()],
            ..MockClient::default()
        });
        let d = dispatcher(client.clone(), connected_monitor());

        let payload = image_payload();
        let outcome = d.deliver_one("123@g.us", "Sale", Some(&payload)).await;

        assert!(!outcome.delivered);
        assert_eq!(outcome.mode, DeliveryMode::Text);
        assert!(outcome.failure_reason.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_image_degrades_campaign_to_text() {
        let client = Arc::new(MockClient::default());
        let d = dispatcher(client.clone(), connected_monitor());

        // Discard port: the connection is refused immediately
        let campaign = Campaign::new(
            "Sale".to_string(),
            Some(Url::parse("http://127.0.0.1:9/banner.png").unwrap()),
            vec!["123".to_string(), "456".to_string()],
        );
        let outcomes = d.dispatch(&campaign).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(outcome.delivered);
            assert_eq!(outcome.mode, DeliveryMode::Text);
        }
        assert_eq!(client.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_text_broadcast() {
        let client = Arc::new(MockClient::default());
        let d = dispatcher(client.clone(), connected_monitor());

        let campaign = text_campaign(&["123", "456@g.us"]);
        let outcomes = d.dispatch(&campaign).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].destination, "123@g.us");
        assert_eq!(outcomes[1].destination, "456@g.us");
        assert!(outcomes.iter().all(|o| o.mode == DeliveryMode::Text));

        let log: Vec<String> = client.sent_log().into_iter().map(|(d, _)| d).collect();
        assert_eq!(log, vec!["123@g.us", "456@g.us"]);
    }
}
