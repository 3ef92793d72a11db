//! Main service facade
//!
//! Owns the single client handle, the session monitor, and the dispatcher.
//! All state flows through here; the HTTP surface is purely a boundary.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use url::Url;
use uuid::Uuid;

use herald_client::{ClientHandle, DryRunClient, GatewayClient, GroupChat, SessionEvent};
use herald_dispatch::{
    compose, BroadcastDispatcher, Campaign, DispatcherConfig, MessageTemplate, PacingPolicy,
    SendOutcome,
};
use herald_session::{SessionMonitor, SessionStatus};

use crate::config::{ClientMode, Config};
use crate::Result;

/// Size of the lifecycle-event channel. Events are tiny and rare; a full
/// channel backpressures the webhook rather than dropping transitions.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// One inbound broadcast request, before composition and normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastRequest {
    /// Raw destination IDs; the configured defaults apply when omitted
    pub destinations: Option<Vec<String>>,
    /// Main message text
    pub text: Option<String>,
    pub headline: Option<String>,
    pub link: Option<String>,
    pub urgency: Option<String>,
    pub attribution: Option<String>,
    /// Image to fetch and attach
    pub image_url: Option<String>,
}

/// Campaign summary returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub campaign_id: Uuid,
    pub delivered: usize,
    pub failed: usize,
    pub outcomes: Vec<SendOutcome>,
}

impl CampaignReport {
    fn new(campaign_id: Uuid, outcomes: Vec<SendOutcome>) -> Self {
        let delivered = outcomes.iter().filter(|o| o.delivered).count();

        Self {
            campaign_id,
            delivered,
            failed: outcomes.len() - delivered,
            outcomes,
        }
    }
}

/// Main service instance
pub struct Herald {
    config: Config,
    client: ClientHandle,
    monitor: SessionMonitor,
    dispatcher: BroadcastDispatcher,
}

impl Herald {
    /// Wire the facade with the client adapter the configuration selects.
    pub fn new(config: Config) -> Result<Self> {
        let client: ClientHandle = match config.client_mode {
            ClientMode::Gateway => Arc::new(GatewayClient::new(
                &config.gateway_url,
                Duration::from_secs(config.gateway_timeout_secs),
            )?),
            ClientMode::DryRun => Arc::new(DryRunClient),
        };

        Ok(Self::with_client(config, client))
    }

    /// Wire the facade around an existing client handle.
    pub fn with_client(config: Config, client: ClientHandle) -> Self {
        let monitor = SessionMonitor::new();
        let dispatcher_config = DispatcherConfig {
            pacing: PacingPolicy::new(
                config.pre_send_delay_ms.0..=config.pre_send_delay_ms.1,
                config.post_send_delay_ms.0..=config.post_send_delay_ms.1,
            ),
            image_timeout: Duration::from_secs(config.image_timeout_secs),
            min_image_bytes: config.min_image_bytes,
        };
        let dispatcher =
            BroadcastDispatcher::new(client.clone(), monitor.clone(), dispatcher_config);

        Self {
            config,
            client,
            monitor,
            dispatcher,
        }
    }

    /// Build the facade and spawn its event pump.
    ///
    /// Returns the shared instance plus the sender lifecycle events are
    /// pushed through; the pump task is the only writer of session state.
    pub fn start(config: Config) -> Result<(Arc<Self>, mpsc::Sender<SessionEvent>)> {
        let herald = Arc::new(Self::new(config)?);
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        herald.clone().spawn_event_pump(rx);

        // Seed state when the client already holds a live session, e.g.
        // after a Herald restart against a gateway that kept its login
        let probe_client = herald.client.clone();
        let probe_tx = tx.clone();
        tokio::spawn(async move {
            if probe_client.is_ready().await {
                let _ = probe_tx.send(SessionEvent::Connected).await;
            }
        });

        Ok((herald, tx))
    }

    fn spawn_event_pump(self: Arc<Self>, mut rx: mpsc::Receiver<SessionEvent>) {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                // Announce only on the transition into connected, not on
                // every repeated connected event
                let fresh_connection = matches!(event, SessionEvent::Connected)
                    && !self.monitor.current_status().connected;

                self.monitor.apply(event);

                if fresh_connection && self.config.announce_on_connect {
                    let herald = self.clone();
                    tokio::spawn(async move {
                        herald.announce().await;
                    });
                }
            }

            tracing::debug!("Event channel closed, pump exiting");
        });
    }

    /// Broadcast the configured announcement. Failures are logged, never
    /// propagated; a failed announcement must not take the process down.
    async fn announce(&self) {
        let Some(text) = self.config.announce_text.clone() else {
            tracing::warn!("announce_on_connect set without announcement text");
            return;
        };

        let request = BroadcastRequest {
            text: Some(text),
            image_url: self.config.announce_image_url.clone(),
            ..BroadcastRequest::default()
        };

        match self.broadcast(request).await {
            Ok(report) => tracing::info!(
                campaign_id = %report.campaign_id,
                delivered = report.delivered,
                failed = report.failed,
                "Connect announcement dispatched"
            ),
            Err(e) => tracing::warn!(error = %e, "Connect announcement failed"),
        }
    }

    /// Snapshot of the session status.
    pub fn status(&self) -> SessionStatus {
        self.monitor.current_status()
    }

    /// Direct access to the monitor, for event ingestion paths that
    /// bypass the pump (tests, embedded use).
    pub fn monitor(&self) -> &SessionMonitor {
        &self.monitor
    }

    /// Compose and dispatch one campaign.
    pub async fn broadcast(&self, request: BroadcastRequest) -> Result<CampaignReport> {
        let destinations = request
            .destinations
            .unwrap_or_else(|| self.config.default_destinations.clone());

        let image_source = request
            .image_url
            .as_deref()
            .map(Url::parse)
            .transpose()?;

        let text = compose(&MessageTemplate {
            headline: request.headline,
            body: request.text,
            link: request.link,
            urgency: request.urgency,
            attribution: request.attribution,
        });

        let campaign = Campaign::new(text, image_source, destinations);
        let campaign_id = campaign.id;
        let outcomes = self.dispatcher.dispatch(&campaign).await?;

        Ok(CampaignReport::new(campaign_id, outcomes))
    }

    /// List the group chats the session participates in.
    pub async fn groups(&self) -> Result<Vec<GroupChat>> {
        Ok(self.client.list_group_chats().await?)
    }
}
