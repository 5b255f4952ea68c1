//! Domain layer
//!
//! 接続・ルーム・入力中・履歴の状態と、その状態遷移が生む配信先の計算。
//! トランスポートにも非同期ランタイムにも依存しない純粋なロジックです
//! （`SharedHub` の Mutex と `MessagePusher` trait を除く）。

mod entity;
mod error;
mod history;
mod hub;
mod message_pusher;
mod registry;
mod room_directory;
mod typing;
mod value_object;

pub use entity::{
    ChatMessage, Delivery, InboundEvent, Notification, RoomSummary, Scope, Sender, SystemKind,
};
pub use error::{ClaimError, MessagePushError, ValueObjectError};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use hub::{ChatHub, Departure, SharedHub};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use room_directory::RoomDirectory;
pub use typing::{DEFAULT_TYPING_TIMEOUT, TypingTracker};
pub use value_object::{ConnectionId, Identity, MessageBody, RoomName, Timestamp};
