//! Error types of the client side.
//!
//! Transport failures come from [`crate::shared::request`]; application
//! failures are `success: false` envelopes returned by the server.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request could not even be constructed (bad URL, FormData unavailable).
    #[error("failed to build request: {0}")]
    Build(String),
    #[error("failed to send request: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Transport(#[from] RequestError),
    #[error("server rejected the request: {0}")]
    Application(String),
}
