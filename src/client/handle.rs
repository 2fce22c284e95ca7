//! Client representation.
//!
//! `Client` models a connected client and holds the sending side of the
//! per-client channel used by the broker to push frames. The transport's
//! write loop drains the receiving side onto the WebSocket, so the broker
//! never touches a socket directly.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::utils::error::BrokerError;

#[derive(Debug)]
pub struct Client {
    /// Unique identifier for the client, assigned at connection time.
    pub id: String,

    /// Channel to send WebSocket frames to the client.
    pub sender: UnboundedSender<WsMessage>,
}

impl Client {
    /// Create a new client with a sender channel. The `id` is a UUID used
    /// to identify the client across broker operations.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
        }
    }

    /// Queue a frame for delivery. Fails once the client's write loop has
    /// exited, which the broker treats as a disconnect.
    pub fn send(&self, msg: WsMessage) -> Result<(), BrokerError> {
        self.sender.send(msg).map_err(|_| BrokerError::Unreachable {
            client_id: self.id.clone(),
        })
    }
}
