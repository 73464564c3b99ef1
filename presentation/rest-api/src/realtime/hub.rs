use std::sync::Arc;

use chrono::Utc;
use futures::{SinkExt, StreamExt};
use poem::{
    IntoResponse, handler,
    web::{
        Data,
        websocket::{Message, WebSocket},
    },
};
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use business::domain::logger::Logger;
use business::domain::realtime::events::{self, ClientEvent, ServerEvent};

/// Fan-out point shared by every open socket. Frames are serialized once
/// and delivered best-effort: a subscriber that falls behind skips frames.
pub struct ChatHub {
    sender: broadcast::Sender<String>,
    logger: Arc<dyn Logger>,
}

impl ChatHub {
    pub fn new(capacity: usize, logger: Arc<dyn Logger>) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, logger }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: &ServerEvent) {
        match serde_json::to_string(event) {
            // Sending only fails when no socket is subscribed.
            Ok(frame) => {
                let _ = self.sender.send(frame);
            }
            Err(e) => self.logger.error(&format!("Could not encode event: {e}")),
        }
    }

    /// Handles one text frame from a client.
    pub fn handle_frame(&self, frame: &str) {
        let Some(event) = ClientEvent::parse(frame) else {
            self.logger.debug(&format!("Ignoring frame: {frame}"));
            return;
        };
        if let Some(reply) = events::respond(event, Utc::now().timestamp_millis()) {
            self.publish(&reply);
        }
    }
}

#[handler]
pub fn ws(ws: WebSocket, Data(hub): Data<&Arc<ChatHub>>) -> impl IntoResponse {
    let hub = Arc::clone(hub);

    ws.on_upgrade(move |socket| async move {
        let socket_id = Uuid::new_v4().to_string();
        let (mut sink, mut stream) = socket.split();
        let mut receiver = hub.subscribe();
        hub.logger.info(&format!("Socket connected: {socket_id}"));

        if let Ok(welcome) = serde_json::to_string(&events::welcome(&socket_id))
            && sink.send(Message::Text(welcome)).await.is_err()
        {
            return;
        }

        let writer = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(frame) => {
                        if sink.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });

        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => hub.handle_frame(&text),
                Message::Close(_) => break,
                _ => {}
            }
        }

        writer.abort();
        hub.logger.info(&format!("Socket disconnected: {socket_id}"));
    })
}
