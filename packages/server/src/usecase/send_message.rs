//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase の send_global / send_room / send_private
//! - 配信先の選定と、グローバルメッセージの履歴への追加
//!
//! ### なぜこのテストが必要か
//! - グローバルメッセージは送信者以外に届き、送信者にはエコーされない
//! - ルームメッセージは送信者を含むルームのメンバーだけに届く
//! - プライベートメッセージは宛先と送信者だけに届く
//! - 宛先不明・ルーム未所属の場合は黙って捨てられる
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 種類のメッセージ送信
//! - エッジケース：送信者のみが接続している、宛先がオフライン、自分宛てのプライベートメッセージ

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, Identity, MessageBody, MessagePusher, SharedHub};

use super::delivery::{deliver, now, recipients_of};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    hub: SharedHub,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        hub: SharedHub,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hub,
            message_pusher,
            clock,
        }
    }

    /// グローバルメッセージを送信
    ///
    /// # Returns
    ///
    /// 配信先の接続（送信者以外の全接続）
    pub async fn send_global(&self, from: ConnectionId, body: MessageBody) -> Vec<ConnectionId> {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.send_global(from, body, now(self.clock.as_ref()));
        let recipients = recipients_of(&deliveries);
        deliver(self.message_pusher.as_ref(), deliveries).await;
        recipients
    }

    /// 所属ルームにメッセージを送信
    ///
    /// ルームに所属していない場合は何も送らず、空のリストを返します。
    pub async fn send_room(&self, from: ConnectionId, body: MessageBody) -> Vec<ConnectionId> {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.send_room(from, body, now(self.clock.as_ref()));
        if deliveries.is_empty() {
            tracing::debug!("Dropped room message from {}: not in a room", from);
        }
        let recipients = recipients_of(&deliveries);
        deliver(self.message_pusher.as_ref(), deliveries).await;
        recipients
    }

    /// プライベートメッセージを送信
    ///
    /// 宛先がオフラインの場合は何も送らず、空のリストを返します。
    pub async fn send_private(
        &self,
        from: ConnectionId,
        to: Identity,
        body: MessageBody,
    ) -> Vec<ConnectionId> {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.send_private(from, to.clone(), body, now(self.clock.as_ref()));
        if deliveries.is_empty() {
            tracing::debug!("Dropped private message from {} to '{}'", from, to);
        }
        let recipients = recipients_of(&deliveries);
        deliver(self.message_pusher.as_ref(), deliveries).await;
        recipients
    }
}
