//! Session status snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point-in-time view of the external session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// True once the external client reported a successful login
    pub connected: bool,
    /// Scannable login-challenge artifact, set while a challenge is open.
    /// Once `connected` is true the value may be stale and is not
    /// actionable; `state()` is the authoritative read.
    pub login_artifact: Option<String>,
    /// When the last lifecycle transition was applied
    pub changed_at: DateTime<Utc>,
}

impl SessionStatus {
    /// Derive the three-state view served to clients.
    pub fn state(&self) -> SessionState {
        if self.connected {
            SessionState::Connected
        } else if self.login_artifact.is_some() {
            SessionState::ChallengePending
        } else {
            SessionState::Waiting
        }
    }

    /// The artifact, only while it is actionable.
    pub fn actionable_artifact(&self) -> Option<&str> {
        match self.state() {
            SessionState::ChallengePending => self.login_artifact.as_deref(),
            _ => None,
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self {
            connected: false,
            login_artifact: None,
            changed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    /// No session and no open challenge; the client is starting up or
    /// between challenges
    Waiting,
    /// A login challenge is open and waiting to be scanned
    ChallengePending,
    /// Logged in; sends are possible
    Connected,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Waiting => "waiting",
            SessionState::ChallengePending => "challenge-pending",
            SessionState::Connected => "connected",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_derivation() {
        let mut status = SessionStatus::default();
        assert_eq!(status.state(), SessionState::Waiting);

        status.login_artifact = Some("https://example.com/qr".to_string());
        assert_eq!(status.state(), SessionState::ChallengePending);

        status.connected = true;
        assert_eq!(status.state(), SessionState::Connected);
    }

    #[test]
    fn test_stale_artifact_is_not_actionable() {
        let status = SessionStatus {
            connected: true,
            login_artifact: Some("https://example.com/qr".to_string()),
            changed_at: Utc::now(),
        };

        // Connected wins over a leftover challenge artifact
        assert_eq!(status.state(), SessionState::Connected);
        assert_eq!(status.actionable_artifact(), None);
    }
}
