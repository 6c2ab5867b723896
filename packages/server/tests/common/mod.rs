//! Helpers shared by the server integration tests.
//!
//! The server runs in-process on an ephemeral port; clients speak the JSON
//! frame protocol through tokio-tungstenite.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use agora_server::ui::{AppState, Server};
use agora_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpListener, net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Destination no handler accepts; used as a round-trip barrier
const BARRIER_DESTINATION: &str = "/topic/barrier";

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    pub state: Arc<AppState>,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = Arc::new(AppState::new(Arc::new(SystemClock)));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let server = Server::new(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = server.serve(listener).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        TestServer {
            state,
            addr,
            handle,
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a room directly through the use case
    pub async fn create_room(&self, name: &str) -> String {
        self.state
            .create_room_usecase
            .execute(name.to_string())
            .await
            .expect("Failed to create room")
            .id
            .to_string()
    }

    /// Connect a client and wait for the `connected` frame
    pub async fn connect(&self) -> TestClient {
        TestClient::connect(&self.ws_url()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct for one WebSocket connection
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    pub connection_id: String,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (mut ws, _) = connect_async(url)
            .await
            .expect("Failed to connect to test server");

        let frame = next_frame(&mut ws).await.expect("No connected frame");
        assert_eq!(frame["command"], "connected");
        let connection_id = frame["connection_id"]
            .as_str()
            .expect("connection_id missing")
            .to_string();

        TestClient { ws, connection_id }
    }

    async fn send_frame(&mut self, frame: Value) {
        self.ws
            .send(Message::text(frame.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send raw text");
    }

    pub async fn subscribe(&mut self, destination: &str) {
        self.send_frame(json!({"command": "subscribe", "destination": destination}))
            .await;
    }

    pub async fn send(&mut self, destination: &str, body: Value) {
        self.send_frame(json!({"command": "send", "destination": destination, "body": body}))
            .await;
    }

    /// Subscribe to the given topics and wait until the server has applied them
    pub async fn subscribe_all(&mut self, destinations: &[&str]) {
        for destination in destinations {
            self.subscribe(destination).await;
        }
        self.barrier().await;
    }

    /// Round trip through the server: every frame sent before this call has
    /// been processed once it returns. Frames received meanwhile are dropped.
    pub async fn barrier(&mut self) {
        self.subscribe(BARRIER_DESTINATION).await;
        loop {
            let (destination, body) = self.recv().await;
            if destination == "/user/queue/errors"
                && body["message"]
                    .as_str()
                    .is_some_and(|m| m.contains(BARRIER_DESTINATION))
            {
                return;
            }
        }
    }

    /// Receive the next `message` frame as (destination, body)
    pub async fn recv(&mut self) -> (String, Value) {
        let frame = next_frame(&mut self.ws)
            .await
            .expect("Timed out waiting for a frame");
        assert_eq!(frame["command"], "message", "unexpected frame: {}", frame);
        let destination = frame["destination"]
            .as_str()
            .expect("destination missing")
            .to_string();
        (destination, frame["body"].clone())
    }

    /// Receive frames until one arrives on `destination`
    pub async fn recv_from(&mut self, destination: &str) -> Value {
        loop {
            let (received, body) = self.recv().await;
            if received == destination {
                return body;
            }
        }
    }

    /// Assert that nothing arrives within `duration`
    pub async fn expect_silence(&mut self, duration: Duration) {
        if let Ok(Some(Ok(msg))) = tokio::time::timeout(duration, self.ws.next()).await {
            panic!("expected no frame, got {:?}", msg);
        }
    }

    pub async fn join(&mut self, username: &str, room_id: Option<&str>) {
        let destination = match room_id {
            Some(id) => format!("/app/chat.addUser/{}", id),
            None => "/app/chat.addUser".to_string(),
        };
        self.send(&destination, json!({"sender": username, "type": "JOIN"}))
            .await;
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}

async fn next_frame(ws: &mut WebSocketStream<MaybeTlsStream<TcpStream>>) -> Option<Value> {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .ok()??
            .ok()?;
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).ok();
        }
    }
}
