//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - Identity の claim、presence のブロードキャスト、履歴の再送
//!
//! ### なぜこのテストが必要か
//! - 同じ Identity の接続は常に 1 つでなければならない
//! - 重複した接続は拒否され、既存の接続が切られてはいけない
//! - 新しい接続は presence の後に履歴を古い順で受け取る
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規クライアントの接続
//! - 異常系：接続中の Identity での接続試行
//! - エッジケース：履歴がある状態での接続

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, MessagePusher, PusherChannel, SharedHub};

use super::{delivery::deliver, error::ConnectError};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    hub: SharedHub,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(hub: SharedHub, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            hub,
            message_pusher,
        }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `identity` - クライアントが名乗った表示名
    /// * `sender` - クライアントへのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - この接続に発行したハンドル
    /// * `Err(ConnectError)` - 接続拒否
    pub async fn execute(
        &self,
        identity: Identity,
        sender: PusherChannel,
    ) -> Result<ConnectionId, ConnectError> {
        let connection = ConnectionId::generate();

        let mut hub = self.hub.lock().await;
        let deliveries = hub.connect(identity.clone(), connection)?;

        // presence と履歴がこの接続にも届くよう、配信前に登録する
        self.message_pusher.register_client(connection, sender).await;
        deliver(self.message_pusher.as_ref(), deliveries).await;

        tracing::info!(
            "'{}' connected as {} ({} online)",
            identity,
            connection,
            hub.online_identities().len()
        );
        Ok(connection)
    }
}
