//! Entities
//!
//! 一度生成されたメッセージは変更されません。

use super::value_object::{ConnectionId, Identity, MessageBody, RoomName, Timestamp};

/// メッセージの送信者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    /// 接続中のクライアント
    Identity(Identity),
    /// サーバーが生成するアナウンス
    System,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Sender::Identity(identity) => identity.as_str(),
            Sender::System => "System",
        }
    }
}

/// メッセージの配信範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Room(RoomName),
    Private { to: Identity },
}

/// System アナウンスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    Join,
    Leave,
}

impl SystemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemKind::Join => "join",
            SystemKind::Leave => "leave",
        }
    }
}

/// チャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: MessageBody,
    pub timestamp: Timestamp,
    pub scope: Scope,
    pub system: Option<SystemKind>,
}

impl ChatMessage {
    pub fn global(sender: Identity, body: MessageBody, timestamp: Timestamp) -> Self {
        Self {
            sender: Sender::Identity(sender),
            body,
            timestamp,
            scope: Scope::Global,
            system: None,
        }
    }

    pub fn room(sender: Identity, room: RoomName, body: MessageBody, timestamp: Timestamp) -> Self {
        Self {
            sender: Sender::Identity(sender),
            body,
            timestamp,
            scope: Scope::Room(room),
            system: None,
        }
    }

    pub fn private(
        sender: Identity,
        to: Identity,
        body: MessageBody,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sender: Sender::Identity(sender),
            body,
            timestamp,
            scope: Scope::Private { to },
            system: None,
        }
    }

    /// ルームへの入室・退室アナウンス
    pub fn room_announcement(
        who: &Identity,
        room: RoomName,
        kind: SystemKind,
        timestamp: Timestamp,
    ) -> Self {
        let text = match kind {
            SystemKind::Join => format!("{} joined the room.", who),
            SystemKind::Leave => format!("{} left the room.", who),
        };
        Self {
            sender: Sender::System,
            body: MessageBody::announcement(text),
            timestamp,
            scope: Scope::Room(room),
            system: Some(kind),
        }
    }
}

/// クライアントに届ける通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// スコープに応じて message / roomMessage / privateMessage になる
    Chat(ChatMessage),
    /// 接続中の Identity 一覧（presence）
    OnlineUsers(Vec<Identity>),
    Typing(Identity),
    StopTyping(Identity),
}

/// 通知と、それを受け取る接続の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipients: Vec<ConnectionId>,
    pub notification: Notification,
}

impl Delivery {
    pub fn new(recipients: Vec<ConnectionId>, notification: Notification) -> Self {
        Self {
            recipients,
            notification,
        }
    }
}

/// クライアントから届いたイベント（バリデーション済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Message { body: MessageBody },
    RoomMessage { body: MessageBody },
    PrivateMessage { to: Identity, body: MessageBody },
    JoinRoom(RoomName),
    LeaveRoom,
    Typing,
    StopTyping,
}

/// ルームとそのメンバー（HTTP API 用のスナップショット）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub members: Vec<Identity>,
}
