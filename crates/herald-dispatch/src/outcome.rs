//! Delivery outcomes and the fallback ladder

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Image with the composed text as caption
    Image,
    /// Text only
    Text,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Image => "image",
            DeliveryMode::Text => "text",
        }
    }
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recorded result of attempting delivery to one destination.
///
/// When every rung failed, `mode` is the last rung attempted.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub destination: String,
    pub delivered: bool,
    pub mode: DeliveryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl SendOutcome {
    pub fn delivered(destination: &str, mode: DeliveryMode) -> Self {
        Self {
            destination: destination.to_string(),
            delivered: true,
            mode,
            failure_reason: None,
        }
    }

    pub fn failed(destination: &str, mode: DeliveryMode, reason: String) -> Self {
        Self {
            destination: destination.to_string(),
            delivered: false,
            mode,
            failure_reason: Some(reason),
        }
    }
}

/// The fallback ladder for one destination, highest-fidelity rung first.
///
/// Keeping the ladder as data keeps the degradation decision pure; the
/// dispatcher walks the rungs and stops at the first success.
pub fn fallback_rungs(has_image: bool) -> &'static [DeliveryMode] {
    if has_image {
        &[DeliveryMode::Image, DeliveryMode::Text]
    } else {
        &[DeliveryMode::Text]
    }
}
