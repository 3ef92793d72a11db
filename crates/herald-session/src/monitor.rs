//! Session Monitor
//!
//! A pure state sink: the external client pushes lifecycle events, the
//! monitor folds them into one status cell, and readers take snapshots.
//! No polling and no timeouts are owned here.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use herald_client::SessionEvent;

use crate::artifact::render_challenge;
use crate::status::SessionStatus;

#[derive(Clone, Default)]
pub struct SessionMonitor {
    status: Arc<RwLock<SessionStatus>>,
}

impl SessionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one lifecycle event into the status cell.
    ///
    /// The event pump is the only production caller, which keeps the cell
    /// single-writer.
    pub fn apply(&self, event: SessionEvent) {
        tracing::info!(event = %event, "Session lifecycle event");

        match event {
            SessionEvent::LoginChallenge(challenge) => self.on_login_challenge(&challenge),
            SessionEvent::Connected => self.on_connected(),
            SessionEvent::Disconnected => self.on_disconnected(),
            SessionEvent::LoggedOut => self.on_logged_out(),
        }
    }

    /// A fresh login challenge was issued; render and store its artifact.
    pub fn on_login_challenge(&self, challenge: &str) {
        *self.status.write() = SessionStatus {
            connected: false,
            login_artifact: Some(render_challenge(challenge)),
            changed_at: Utc::now(),
        };
    }

    /// Login succeeded. The artifact is left in place; it stops being
    /// actionable the moment `connected` flips.
    pub fn on_connected(&self) {
        let mut status = self.status.write();
        status.connected = true;
        status.changed_at = Utc::now();
    }

    /// The transport dropped. The artifact is not cleared; a re-issued
    /// challenge overwrites it when the client produces one.
    pub fn on_disconnected(&self) {
        let mut status = self.status.write();
        status.connected = false;
        status.changed_at = Utc::now();
    }

    pub fn on_logged_out(&self) {
        let mut status = self.status.write();
        status.connected = false;
        status.changed_at = Utc::now();
    }

    /// Non-blocking snapshot of the current status.
    pub fn current_status(&self) -> SessionStatus {
        self.status.read().clone()
    }
}
