use super::Client;
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_client_new() {
    let (tx, _rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    assert!(!client.id.is_empty());
}

#[test]
fn test_clients_get_distinct_ids() {
    let (tx, _rx) = mpsc::unbounded_channel::<WsMessage>();
    let a = Client::new(tx.clone());
    let b = Client::new(tx);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_send_queues_frame() {
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);

    client.send(WsMessage::text("hi")).unwrap();
    assert!(matches!(rx.try_recv(), Ok(WsMessage::Text(_))));
}

#[test]
fn test_send_fails_once_receiver_is_gone() {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);

    drop(rx);
    assert!(client.send(WsMessage::text("hi")).is_err());
}
