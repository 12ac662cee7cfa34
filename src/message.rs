//! Event protocol definitions
//!
//! JSON-based bidirectional event protocol using Serde's tagged enum
//! for type-safe serialization/deserialization. Payload fields are
//! camelCase on the wire (`roomId`, `displayName`, `isTyping`, ...).

use serde::{Deserialize, Serialize};

use crate::types::now_millis;

/// Client → Server event
///
/// All decoded events a connection may emit into the broker.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join a named room (creates it if absent)
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, display_name: String },
    /// Send a chat message to the current room
    #[serde(rename_all = "camelCase")]
    SendMessage { room_id: String, text: String },
    /// Ephemeral typing signal, relayed and never stored
    #[serde(rename_all = "camelCase")]
    Typing {
        room_id: String,
        is_typing: bool,
        text: String,
    },
    /// Leave the current room
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String },
}

/// Server → Client event
///
/// Everything the broker fans out to room members.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Roster change notification ("... has joined/left the room")
    System { text: String, timestamp: u64 },
    /// Chat message, delivered to every room member including the sender
    #[serde(rename_all = "camelCase")]
    Chat {
        sender_id: String,
        sender_name: String,
        text: String,
        timestamp: u64,
    },
    /// Typing relay, delivered to every room member except the sender
    #[serde(rename_all = "camelCase")]
    UserTyping {
        user_id: String,
        display_name: String,
        is_typing: bool,
        text: String,
    },
}

impl ServerEvent {
    /// System notification for a participant joining
    pub fn joined(display_name: &str) -> Self {
        Self::System {
            text: format!("{} has joined the room", display_name),
            timestamp: now_millis(),
        }
    }

    /// System notification for a participant leaving
    pub fn left(display_name: &str) -> Self {
        Self::System {
            text: format!("{} has left the room", display_name),
            timestamp: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_deserialize_join() {
        let json = r#"{"type": "join_room", "roomId": "lobby", "displayName": "Alice"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::JoinRoom {
                room_id,
                display_name,
            } => {
                assert_eq!(room_id, "lobby");
                assert_eq!(display_name, "Alice");
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_client_event_deserialize_typing() {
        let json = r#"{"type": "typing", "roomId": "lobby", "isTyping": true, "text": "hel"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        match event {
            ClientEvent::Typing {
                room_id,
                is_typing,
                text,
            } => {
                assert_eq!(room_id, "lobby");
                assert!(is_typing);
                assert_eq!(text, "hel");
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_server_event_serialize_system() {
        let event = ServerEvent::joined("Alice");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"system\""));
        assert!(json.contains("\"text\":\"Alice has joined the room\""));
        assert!(json.contains("\"timestamp\":"));
    }

    #[test]
    fn test_server_event_serialize_chat_camel_case() {
        let event = ServerEvent::Chat {
            sender_id: "abc".to_string(),
            sender_name: "Bob".to_string(),
            text: "hi".to_string(),
            timestamp: 42,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"chat\""));
        assert!(json.contains("\"senderId\":\"abc\""));
        assert!(json.contains("\"senderName\":\"Bob\""));
    }

    #[test]
    fn test_server_event_serialize_user_typing() {
        let event = ServerEvent::UserTyping {
            user_id: "abc".to_string(),
            display_name: "Bob".to_string(),
            is_typing: false,
            text: String::new(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"user_typing\""));
        assert!(json.contains("\"isTyping\":false"));
        assert!(json.contains("\"displayName\":\"Bob\""));
    }
}
