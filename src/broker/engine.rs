//! Broker engine
//!
//! This module contains the in-memory broker implementation responsible for:
//! - managing the registry of connected clients
//! - managing topics and their ordered subscriber lists
//! - delivering published messages to subscribers and broadcasts to everyone
//! - decoding inbound frames and routing them to the matching operation
//!
//! Concurrency and usage notes:
//! - The public API here is synchronous and designed to be held behind a
//!   lock (`Arc<Mutex<Broker>>`) by the transport layer, so every operation
//!   sees a consistent joint view of both registries.
//! - Sends are pushes into per-client channels, never socket writes, so
//!   holding the broker lock across a send does not block on the network.
//! - A failed send means the client's write loop is gone; the engine evicts
//!   that client on the spot and keeps delivering to the rest.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::broker::message::{Command, ServerMessage};
use crate::broker::topic::{SubscriberId, Topic};
use crate::client::Client;

#[derive(Debug, Default)]
pub struct Broker {
    topics: HashMap<String, Topic>,
    clients: HashMap<SubscriberId, Client>,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new client with the broker and greets it with a welcome
    /// frame carrying its id. Once this returns, the client is visible to
    /// `publish` and `broadcast`.
    pub fn register_client(&mut self, client: Client) {
        let welcome = ServerMessage::Welcome {
            client_id: client.id.clone(),
        };
        match serde_json::to_string(&welcome) {
            Ok(json) => {
                if let Err(e) = client.send(WsMessage::text(json)) {
                    warn!("failed to greet new client: {e}");
                }
            }
            Err(e) => warn!("failed to serialize welcome frame: {e}"),
        }

        info!(
            "client {} connected ({} total)",
            client.id,
            self.clients.len() + 1
        );
        self.clients.insert(client.id.clone(), client);
    }

    /// Removes a client and every subscription it holds, in one step under
    /// the caller's lock: subscriptions are purged first, then the registry
    /// entry, so no lookup can observe a subscription pointing at a client
    /// that is already gone. Removing an absent client is a no-op.
    pub fn remove_client(&mut self, client_id: &SubscriberId) {
        for topic in self.topics.values_mut() {
            topic.unsubscribe(client_id);
        }
        self.topics.retain(|_, t| !t.is_empty());

        if self.clients.remove(client_id).is_some() {
            info!(
                "client {client_id} removed ({} remaining)",
                self.clients.len()
            );
        }
    }

    /// Subscribes a client to a topic. Automatically creates the topic if
    /// it doesn't exist. Subscribing twice to the same topic is a no-op.
    pub fn subscribe(&mut self, topic: &str, subscriber: SubscriberId) {
        let topic = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic));
        topic.subscribe(subscriber);
    }

    /// Unsubscribes a client from a topic. If the topic does not exist or
    /// the client never subscribed, nothing happens.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &SubscriberId) {
        if let Some(t) = self.topics.get_mut(topic) {
            t.unsubscribe(subscriber);
            if t.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Whether `subscriber` currently holds a subscription to `topic`.
    pub fn is_subscribed(&self, topic: &str, subscriber: &SubscriberId) -> bool {
        self.topics
            .get(topic)
            .is_some_and(|t| t.contains(subscriber))
    }

    /// Subscribers of `topic` in subscription order; empty when the topic
    /// is unknown.
    pub fn subscribers_of(&self, topic: &str) -> &[SubscriberId] {
        self.topics
            .get(topic)
            .map(|t| t.subscribers())
            .unwrap_or(&[])
    }

    /// Number of currently connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Whether a client with this id is currently registered.
    pub fn is_registered(&self, client_id: &SubscriberId) -> bool {
        self.clients.contains_key(client_id)
    }

    /// Delivers `payload` to every subscriber of `topic`, oldest
    /// subscription first. A subscriber whose channel is closed is evicted
    /// together with its subscriptions; delivery continues to the rest.
    /// Publishing to a topic nobody subscribed to is a successful no-op.
    pub fn publish(&mut self, topic: &str, payload: &serde_json::Value) {
        let Some(t) = self.topics.get(topic) else {
            debug!("publish to topic '{topic}' with no subscribers");
            return;
        };

        let text = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize payload for topic '{topic}': {e}");
                return;
            }
        };
        let frame = WsMessage::text(text);

        let mut dead = Vec::new();
        for sub_id in t.subscribers() {
            match self.clients.get(sub_id) {
                Some(client) => {
                    if let Err(e) = client.send(frame.clone()) {
                        warn!("{e}; evicting");
                        dead.push(sub_id.clone());
                    }
                }
                None => warn!("no client registered with id: {sub_id}"),
            }
        }

        for id in &dead {
            self.remove_client(id);
        }
    }

    /// Sends `payload` to every connected client, subscriptions aside.
    /// Meant for system-wide notices. Failed recipients are evicted, the
    /// rest still get the frame.
    pub fn broadcast(&mut self, payload: &serde_json::Value) {
        let text = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize broadcast payload: {e}");
                return;
            }
        };
        let frame = WsMessage::text(text);

        let mut dead = Vec::new();
        for (id, client) in &self.clients {
            if let Err(e) = client.send(frame.clone()) {
                warn!("{e}; evicting");
                dead.push(id.clone());
            }
        }

        for id in &dead {
            self.remove_client(id);
        }
    }

    /// Decodes one inbound frame from `client_id` and routes it.
    ///
    /// A frame that fails to decode is logged and dropped; the connection
    /// stays open. A frame whose action this broker does not recognize is
    /// ignored, so newer clients keep working against older brokers.
    pub fn dispatch(&mut self, client_id: &SubscriberId, raw: &[u8]) {
        let command = match Command::decode(raw) {
            Ok(command) => command,
            Err(e) => {
                warn!("dropping frame from {client_id}: {e}");
                return;
            }
        };

        match command {
            Command::Publish { topic, message } => {
                debug!("{client_id} published to {topic}");
                self.publish(&topic, &message);
            }
            Command::Subscribe { topic } => {
                debug!("{client_id} subscribed to {topic}");
                self.subscribe(&topic, client_id.clone());
            }
            Command::Unsubscribe { topic } => {
                debug!("{client_id} unsubscribed from {topic}");
                self.unsubscribe(&topic, client_id);
            }
            Command::Unknown => {}
        }
    }
}
