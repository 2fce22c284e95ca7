//! The `transport` module is responsible for handling network communication
//! with clients via WebSockets.
//!
//! It owns the listening socket, performs the WebSocket handshake, and runs
//! one read loop and one write loop per connection. Every protocol decision
//! is delegated to the broker; the transport only moves bytes.

pub mod websocket;

pub use websocket::start_websocket_server;
