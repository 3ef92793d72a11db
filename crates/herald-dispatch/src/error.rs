//! Dispatch error types

use thiserror::Error;

/// Failures that prevent a campaign from starting at all.
///
/// Everything past the preconditions is absorbed into per-destination
/// outcomes; `dispatch` never fails once the first send is attempted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Session is not connected; nothing was sent")]
    NotReady,

    #[error("No valid destinations after normalization; nothing was sent")]
    NoDestinations,
}
