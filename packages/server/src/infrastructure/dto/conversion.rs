//! Conversion logic between DTOs and domain models.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, Identity, InboundEvent, MessageBody, Notification, RoomName, RoomSummary, Scope,
    ValueObjectError,
};
use crate::infrastructure::dto::{
    http::{HistoryEntryDto, RoomSummaryDto},
    websocket::{ClientEvent, MessagePayload, ServerEvent},
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ClientEvent> for InboundEvent {
    type Error = ValueObjectError;

    fn try_from(dto: ClientEvent) -> Result<Self, Self::Error> {
        Ok(match dto {
            ClientEvent::Message(payload) => InboundEvent::Message {
                body: MessageBody::new(payload.message)?,
            },
            ClientEvent::RoomMessage(payload) => InboundEvent::RoomMessage {
                body: MessageBody::new(payload.message)?,
            },
            ClientEvent::PrivateMessage(request) => InboundEvent::PrivateMessage {
                to: Identity::new(request.to)?,
                body: MessageBody::new(request.message)?,
            },
            ClientEvent::JoinRoom(room) => InboundEvent::JoinRoom(RoomName::new(room)?),
            ClientEvent::LeaveRoom => InboundEvent::LeaveRoom,
            ClientEvent::Typing => InboundEvent::Typing,
            ClientEvent::StopTyping => InboundEvent::StopTyping,
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for MessagePayload {
    fn from(model: &ChatMessage) -> Self {
        let (room, private, to) = match &model.scope {
            Scope::Global => (None, None, None),
            Scope::Room(room) => (Some(room.as_str().to_string()), None, None),
            Scope::Private { to } => (None, Some(true), Some(to.as_str().to_string())),
        };
        Self {
            sender: model.sender.as_str().to_string(),
            message: model.body.as_str().to_string(),
            timestamp: model.timestamp.value(),
            room,
            private,
            to,
            system: model.system.map(|_| true),
            kind: model.system.map(|kind| kind.as_str().to_string()),
        }
    }
}

impl From<&Notification> for ServerEvent {
    fn from(model: &Notification) -> Self {
        match model {
            Notification::Chat(message) => {
                let payload = MessagePayload::from(message);
                match message.scope {
                    Scope::Global => ServerEvent::Message(payload),
                    Scope::Room(_) => ServerEvent::RoomMessage(payload),
                    Scope::Private { .. } => ServerEvent::PrivateMessage(payload),
                }
            }
            Notification::OnlineUsers(identities) => ServerEvent::OnlineUsers(
                identities
                    .iter()
                    .map(|identity| identity.as_str().to_string())
                    .collect(),
            ),
            Notification::Typing(identity) => ServerEvent::Typing(identity.as_str().to_string()),
            Notification::StopTyping(identity) => {
                ServerEvent::StopTyping(identity.as_str().to_string())
            }
        }
    }
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(model: RoomSummary) -> Self {
        Self {
            name: model.name.into_string(),
            members: model
                .members
                .into_iter()
                .map(Identity::into_string)
                .collect(),
        }
    }
}

impl From<&ChatMessage> for HistoryEntryDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            sender: model.sender.as_str().to_string(),
            message: model.body.as_str().to_string(),
            sent_at: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}
