//! WebSocket event DTOs.
//!
//! Every frame is a JSON text envelope `{"event": <name>, "data": <payload>}`.
//! Events without a payload omit `data`.

use serde::{Deserialize, Serialize};

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Message(TextPayload),
    RoomMessage(TextPayload),
    PrivateMessage(PrivateMessageRequest),
    JoinRoom(String),
    LeaveRoom,
    Typing,
    StopTyping,
}

/// Body of a `message` / `roomMessage` event
///
/// Unknown fields (e.g. a client-side `sender` or `timestamp`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    pub message: String,
}

/// Body of a `privateMessage` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessageRequest {
    pub to: String,
    pub message: String,
}

/// Events sent from the server to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Message(MessagePayload),
    RoomMessage(MessagePayload),
    PrivateMessage(MessagePayload),
    OnlineUsers(Vec<String>),
    Typing(String),
    StopTyping(String),
}

/// Chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub sender: String,
    pub message: String,
    /// Unix timestamp (milliseconds)
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    /// `join` / `leave` for system announcements
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
