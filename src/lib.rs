//! # PubSock
//!
//! `pubsock` is an in-memory, realtime publish/subscribe broker served over
//! WebSockets. Each connected client can publish messages to named topics,
//! subscribe to topics to receive everything published to them, and
//! unsubscribe again. Nothing is persisted: the registries live in memory
//! and vanish on restart.
//!
//! ## Core Modules
//!
//! - `broker`: the client registry, subscription index and dispatch logic.
//! - `client`: a connected client and its outbound channel.
//! - `config`: loading and merging server configuration.
//! - `transport`: the WebSocket server that feeds frames into the broker.
//! - `utils`: logging setup and shared error types.

pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
