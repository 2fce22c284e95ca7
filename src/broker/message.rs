//! Wire protocol for the broker.
//!
//! Inbound frames are JSON objects tagged by an `action` field, for example
//! `{"action":"publish","topic":"news","message":"hello"}`. The `message`
//! body is opaque to the broker and forwarded to subscribers as-is.
//!
//! Frames the broker originates itself (currently only the welcome frame
//! sent at registration) are tagged by `type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::BrokerError;

/// One decoded client command.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Command {
    Publish {
        topic: String,
        #[serde(default)]
        message: Value,
    },
    Subscribe {
        topic: String,
    },
    Unsubscribe {
        topic: String,
    },
    /// Catch-all for actions this broker does not know. Newer clients may
    /// send actions older brokers have never heard of; those frames must
    /// parse so they can be ignored instead of failing decode.
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Decode one inbound frame. Failure here means the frame was not a
    /// valid command envelope; the caller drops it and keeps the
    /// connection open.
    pub fn decode(raw: &[u8]) -> Result<Self, BrokerError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// Frames the broker sends on its own behalf.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "welcome")]
    Welcome { client_id: String },
}
