//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] herald_dispatch::DispatchError),

    #[error("Client error: {0}")]
    Client(#[from] herald_client::ClientError),

    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}
