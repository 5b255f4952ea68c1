//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 退室アナウンス、presence、stopTyping の配信順序
//!
//! ### なぜこのテストが必要か
//! - 切断した Identity はすぐに別の接続から claim できなければならない
//! - 切断処理が 2 回走っても効果は 1 回分だけ
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームに所属し、入力中だったクライアントの切断
//! - エッジケース：同じ接続の 2 回目の切断

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, Identity, MessagePusher, SharedHub};

use super::delivery::{deliver, now};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    hub: SharedHub,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
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

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 切断された Identity。既に切断済みの接続なら `None`
    pub async fn execute(&self, connection: ConnectionId) -> Option<Identity> {
        let mut hub = self.hub.lock().await;
        // 送信チャンネルは claim の有無に関わらず必ず外す
        self.message_pusher.unregister_client(&connection).await;

        let departure = hub.disconnect(connection, now(self.clock.as_ref()))?;
        deliver(self.message_pusher.as_ref(), departure.deliveries).await;

        tracing::info!(
            "'{}' disconnected ({} online)",
            departure.identity,
            hub.online_identities().len()
        );
        Some(departure.identity)
    }
}
