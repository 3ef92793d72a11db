//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway rejected request: HTTP {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}
