//! Session lifecycle events
//!
//! ```text
//! Waiting
//!   ↓ login-challenge
//! ChallengePending
//!   ↓ connected
//! Connected
//!   ↓ disconnected / logged-out
//! Waiting
//! ```

/// A lifecycle event pushed by the external messaging client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login challenge was issued; the payload is the raw challenge data
    /// the end user must scan to authenticate.
    LoginChallenge(String),
    /// Login completed; the session can send messages.
    Connected,
    /// The transport dropped; the client will attempt to re-establish.
    Disconnected,
    /// The account was logged out; a fresh challenge is required.
    LoggedOut,
}

impl SessionEvent {
    /// Build an event from its wire form (event name plus optional payload).
    ///
    /// Returns `None` for unknown event names; the challenge event without
    /// a payload is also unknown, since there is nothing to present.
    pub fn from_parts(kind: &str, payload: Option<&str>) -> Option<Self> {
        match kind {
            "login-challenge" => payload.map(|p| SessionEvent::LoginChallenge(p.to_string())),
            "connected" => Some(SessionEvent::Connected),
            "disconnected" => Some(SessionEvent::Disconnected),
            "logged-out" => Some(SessionEvent::LoggedOut),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::LoginChallenge(_) => "login-challenge",
            SessionEvent::Connected => "connected",
            SessionEvent::Disconnected => "disconnected",
            SessionEvent::LoggedOut => "logged-out",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}
