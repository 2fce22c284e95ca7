//! WebSocket transport
//!
//! This file implements the WebSocket server that feeds the broker.
//! Responsibilities:
//! - Accept TCP/WebSocket connections, up to the configured limit
//! - Create a `Client` for each connection and register it with the `Broker`
//!   (registration sends the welcome frame carrying the client's id)
//! - Forward every inbound text or binary frame to the broker's dispatcher
//! - Tear the client down exactly once when either loop ends

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::broker::Broker;
use crate::client::Client;
use crate::config::Settings;

pub async fn start_websocket_server(addr: String, broker: Arc<Mutex<Broker>>, settings: Settings) {
    let listener = TcpListener::bind(addr.clone()).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    while let Ok((stream, peer)) = listener.accept().await {
        let broker = broker.clone();
        let settings = settings.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("WebSocket handshake error from {peer}: {e}");
                    return;
                }
            };
            let (mut ws_sender, mut ws_receiver) = ws_stream.split();
            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let client = Client::new(tx);
            let client_id = client.id.clone();

            {
                let mut broker = broker.lock().unwrap();
                if broker.client_count() >= settings.broker.max_connections {
                    warn!(
                        "rejecting {peer}: connection limit of {} reached",
                        settings.broker.max_connections
                    );
                    return;
                }
                broker.register_client(client);
            }

            let cleanup_called = Arc::new(AtomicBool::new(false));

            let do_cleanup = {
                let broker = broker.clone();
                let client_id = client_id.clone();
                let cleanup_called = cleanup_called.clone();

                move || {
                    if !cleanup_called.swap(true, Ordering::SeqCst) {
                        let mut broker = broker.lock().unwrap();
                        broker.remove_client(&client_id);
                    }
                }
            };

            // Write loop: drain the per-client channel onto the socket.
            {
                let client_id = client_id.clone();
                let do_cleanup = do_cleanup.clone();

                spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        if let Err(e) = ws_sender.send(msg).await {
                            warn!("failed to send frame to {client_id}: {e}");
                            break;
                        }
                    }

                    do_cleanup();
                });
            }

            // Read loop: every inbound frame goes through the broker's
            // dispatcher; a read error or stream end is the disconnect.
            while let Some(Ok(msg)) = ws_receiver.next().await {
                if msg.is_text() || msg.is_binary() {
                    let mut broker = broker.lock().unwrap();
                    broker.dispatch(&client_id, &msg.into_data());
                }
            }

            info!("client {client_id} disconnected");
            do_cleanup();
        });
    }
}
