//! Service configuration
//!
//! Everything is read from the environment with working defaults; a value
//! that fails to parse falls back to its default with a warning rather
//! than aborting startup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which client adapter to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientMode {
    /// Deliver through the session gateway process
    Gateway,
    /// Accept and log every send; no gateway required
    DryRun,
}

impl FromStr for ClientMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gateway" => Ok(ClientMode::Gateway),
            "dry-run" | "dryrun" => Ok(ClientMode::DryRun),
            _ => Err(format!("Unknown client mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Client adapter selection
    pub client_mode: ClientMode,
    /// Base URL of the session gateway
    pub gateway_url: String,
    /// Request timeout for gateway calls, the only delivery bound
    pub gateway_timeout_secs: u64,
    /// Destinations used when a request names none
    pub default_destinations: Vec<String>,
    /// Bound on the campaign image fetch
    pub image_timeout_secs: u64,
    /// Fetched payloads under this size are treated as not-an-image
    pub min_image_bytes: usize,
    /// Randomized delay before each send, in milliseconds
    pub pre_send_delay_ms: (u64, u64),
    /// Randomized delay after each send, in milliseconds
    pub post_send_delay_ms: (u64, u64),
    /// Broadcast the configured announcement when the session connects
    pub announce_on_connect: bool,
    /// Announcement body text
    pub announce_text: Option<String>,
    /// Announcement image source
    pub announce_image_url: Option<String>,
}

impl Config {
    /// Read configuration from `HERALD_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env_parse("HERALD_PORT", defaults.port),
            client_mode: env_parse("HERALD_CLIENT_MODE", defaults.client_mode),
            gateway_url: env_string("HERALD_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            gateway_timeout_secs: env_parse(
                "HERALD_GATEWAY_TIMEOUT_SECS",
                defaults.gateway_timeout_secs,
            ),
            default_destinations: env_string("HERALD_DESTINATIONS")
                .map(|raw| parse_destinations(&raw))
                .unwrap_or(defaults.default_destinations),
            image_timeout_secs: env_parse("HERALD_IMAGE_TIMEOUT_SECS", defaults.image_timeout_secs),
            min_image_bytes: env_parse("HERALD_MIN_IMAGE_BYTES", defaults.min_image_bytes),
            pre_send_delay_ms: (
                env_parse("HERALD_PRE_DELAY_MIN_MS", defaults.pre_send_delay_ms.0),
                env_parse("HERALD_PRE_DELAY_MAX_MS", defaults.pre_send_delay_ms.1),
            ),
            post_send_delay_ms: (
                env_parse("HERALD_POST_DELAY_MIN_MS", defaults.post_send_delay_ms.0),
                env_parse("HERALD_POST_DELAY_MAX_MS", defaults.post_send_delay_ms.1),
            ),
            announce_on_connect: env_parse("HERALD_ANNOUNCE_ON_CONNECT", false),
            announce_text: env_string("HERALD_ANNOUNCE_TEXT"),
            announce_image_url: env_string("HERALD_ANNOUNCE_IMAGE_URL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            client_mode: ClientMode::DryRun,
            gateway_url: "http://127.0.0.1:3310".to_string(),
            gateway_timeout_secs: 30,
            default_destinations: Vec::new(),
            image_timeout_secs: 15,
            min_image_bytes: 512,
            pre_send_delay_ms: (800, 2500),
            post_send_delay_ms: (2000, 6000),
            announce_on_connect: false,
            announce_text: None,
            announce_image_url: None,
        }
    }
}

/// Split a comma-separated destination list; entries are trimmed here and
/// fully normalized at dispatch time.
fn parse_destinations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env_string(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %raw, "Unparseable config value, using default");
            default
        }),
        None => default,
    }
}
