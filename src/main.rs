//! CLI for PubSock
//!
//! Subcommands:
//! - `server`: run the WebSocket broker
//! - `client`: run a simple example client (useful for smoke tests)

use clap::Parser;
use pubsock::broker::Broker;
use pubsock::config::load_config;
use pubsock::transport::websocket::start_websocket_server;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pubsock")]
enum Command {
    /// Start the WebSocket broker
    Server,
    /// Run the example client (connects, subscribes, publishes)
    Client {
        /// WebSocket server URL to connect to (default: ws://127.0.0.1:8080)
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                error!("Server failed: {}", e);
            }
        }
        Command::Client { url } => {
            if let Err(e) = run_client(&url).await {
                error!("Client failed: {}", e);
            }
        }
    }
}

async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    pubsock::utils::logging::init(&config.server.log_level);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let broker = Arc::new(Mutex::new(Broker::new()));

    tokio::select! {
        _ = start_websocket_server(addr, broker, config.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    // A minimal smoke-test client: print the welcome frame, subscribe to a
    // topic, publish to it, and print whatever comes back.
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    pubsock::utils::logging::init("info");

    let (mut ws_stream, _response) = connect_async(url).await?;

    // The broker greets every connection with its assigned id.
    if let Some(Ok(WsMessage::Text(welcome))) = ws_stream.next().await {
        println!("Welcome: {welcome}");
    }

    let subscribe = json!({ "action": "subscribe", "topic": "chat", "message": null });
    ws_stream
        .send(WsMessage::Text(subscribe.to_string().into()))
        .await?;

    let publish = json!({ "action": "publish", "topic": "chat", "message": "Hello from example" });
    ws_stream
        .send(WsMessage::Text(publish.to_string().into()))
        .await?;

    // Read the message back (the client is subscribed to its own topic).
    if let Some(Ok(WsMessage::Text(incoming))) = ws_stream.next().await {
        println!("Incoming: {incoming}");
    }

    Ok(())
}
