//! MessagePusher trait 定義
//!
//! クライアントへの通知を送る手段の抽象化。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{entity::Notification, error::MessagePushError, value_object::ConnectionId};

/// 接続ごとの送信チャンネル（エンコード済みのフレームを流す）
///
/// 上限のないキューのため、読み取りの遅いクライアントの分はソケットが閉じるまでメモリに溜まり続けます。
/// 既知のスケーリング上の制約です。
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection: &ConnectionId);

    /// 特定の接続に通知
    async fn push_to(
        &self,
        connection: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に通知（一部の失敗は許容する）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
