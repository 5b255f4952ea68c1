//! UseCase: 入力中インジケーター
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - TypingUseCase の start / stop / expire_stale
//! - 定期実行される期限切れの掃除（spawn_expiry_sweeper）
//!
//! ### なぜこのテストが必要か
//! - 入力中の通知は本人以外に届く
//! - stopTyping を送らずに止まったクライアントの表示が残り続けてはいけない
//!
//! ### どのような状況を想定しているか
//! - 正常系：typing → stopTyping
//! - エッジケース：stopTyping が届かずタイムアウトする

use std::{sync::Arc, time::Duration};

use hiroba_shared::time::Clock;
use tokio::task::JoinHandle;

use crate::domain::{ConnectionId, Identity, MessagePusher, Notification, SharedHub};

use super::delivery::{deliver, now};

pub struct TypingUseCase {
    hub: SharedHub,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl TypingUseCase {
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

    /// 入力中にする（本人以外に typing を届ける）
    pub async fn start(&self, connection: ConnectionId) {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.start_typing(connection, now(self.clock.as_ref()));
        deliver(self.message_pusher.as_ref(), deliveries).await;
    }

    /// 入力中を解除する（本人以外に stopTyping を届ける）
    pub async fn stop(&self, connection: ConnectionId) {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.stop_typing(connection);
        deliver(self.message_pusher.as_ref(), deliveries).await;
    }

    /// タイムアウトした入力中状態を解除する
    ///
    /// 解除された Identity を返します。
    pub async fn expire_stale(&self) -> Vec<Identity> {
        let mut hub = self.hub.lock().await;
        let deliveries = hub.expire_typing(now(self.clock.as_ref()));
        let expired: Vec<Identity> = deliveries
            .iter()
            .filter_map(|delivery| match &delivery.notification {
                Notification::StopTyping(identity) => Some(identity.clone()),
                _ => None,
            })
            .collect();
        deliver(self.message_pusher.as_ref(), deliveries).await;

        if !expired.is_empty() {
            tracing::debug!("Typing expired: {:?}", expired);
        }
        expired
    }

    /// `period` ごとに expire_stale を実行するタスクを起動する
    pub fn spawn_expiry_sweeper(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.expire_stale().await;
            }
        })
    }
}
