//! Infrastructure layer
//!
//! - `dto`: ワイヤーフォーマット（WebSocket / HTTP）とドメインモデルの変換
//! - `message_pusher`: `MessagePusher` trait の実装

pub mod dto;
pub mod message_pusher;
