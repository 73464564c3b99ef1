use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WELCOME_MESSAGE: &str = "connected to the shop realtime channel";

/// Frames accepted from a client, shaped as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "client:ping")]
    Ping(Option<Value>),
    #[serde(rename = "chat:message")]
    ChatMessage { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "server:welcome")]
    Welcome {
        message: String,
        #[serde(rename = "socketId")]
        socket_id: String,
    },
    #[serde(rename = "server:pong")]
    Pong { at: i64, data: Value },
    #[serde(rename = "chat:message")]
    ChatMessage { at: i64, text: String },
}

impl ClientEvent {
    /// Parses a text frame; anything malformed or unknown yields `None`.
    pub fn parse(frame: &str) -> Option<Self> {
        serde_json::from_str(frame).ok()
    }
}

pub fn welcome(socket_id: &str) -> ServerEvent {
    ServerEvent::Welcome {
        message: WELCOME_MESSAGE.to_string(),
        socket_id: socket_id.to_string(),
    }
}

/// The event to broadcast for a client event, if any.
pub fn respond(event: ClientEvent, now_millis: i64) -> Option<ServerEvent> {
    match event {
        ClientEvent::Ping(data) => Some(ServerEvent::Pong {
            at: now_millis,
            data: data.unwrap_or(Value::Null),
        }),
        ClientEvent::ChatMessage { text } => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(ServerEvent::ChatMessage {
                at: now_millis,
                text: text.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_echo_ping_payload_in_pong() {
        let event = ClientEvent::parse(r#"{"event":"client:ping","data":{"n":1}}"#).unwrap();

        let reply = respond(event, 1_700_000_000_000).unwrap();

        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({"event": "server:pong", "data": {"at": 1_700_000_000_000_i64, "data": {"n": 1}}})
        );
    }

    #[test]
    fn should_accept_ping_without_payload() {
        let event = ClientEvent::parse(r#"{"event":"client:ping"}"#).unwrap();

        assert_eq!(event, ClientEvent::Ping(None));
        assert!(matches!(
            respond(event, 1),
            Some(ServerEvent::Pong { data: Value::Null, .. })
        ));
    }

    #[test]
    fn should_trim_chat_text() {
        let event = ClientEvent::parse(r#"{"event":"chat:message","data":{"text":"  hi  "}}"#)
            .unwrap();

        let reply = respond(event, 5).unwrap();

        assert_eq!(
            reply,
            ServerEvent::ChatMessage {
                at: 5,
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn should_drop_blank_chat_text() {
        let event = ClientEvent::ChatMessage {
            text: "   ".to_string(),
        };

        assert_eq!(respond(event, 5), None);
    }

    #[test]
    fn should_ignore_unknown_or_malformed_frames() {
        assert_eq!(ClientEvent::parse(r#"{"event":"server:pong","data":{}}"#), None);
        assert_eq!(ClientEvent::parse("not json"), None);
        assert_eq!(ClientEvent::parse(r#"{"event":"chat:message","data":{}}"#), None);
    }

    #[test]
    fn should_serialize_welcome_with_socket_id() {
        let value = serde_json::to_value(welcome("abc")).unwrap();

        assert_eq!(value["event"], "server:welcome");
        assert_eq!(value["data"]["socketId"], "abc");
        assert_eq!(value["data"]["message"], WELCOME_MESSAGE);
    }
}
