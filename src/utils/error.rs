//! Custom error types used within the `pubsock` application.
//!
//! None of these are fatal to the broker process: a `Decode` error drops the
//! offending frame, an `Unreachable` error evicts the client it names.

use thiserror::Error;

/// Errors raised while handling a single client.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The inbound frame was not a valid command envelope.
    #[error("malformed command frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// The per-client channel is closed; the peer is gone.
    #[error("client {client_id} is unreachable")]
    Unreachable { client_id: String },
}
