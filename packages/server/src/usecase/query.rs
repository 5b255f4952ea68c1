//! UseCase: 状態の参照（HTTP API 用）

use crate::domain::{ChatMessage, Identity, RoomSummary, SharedHub};

/// 接続中の Identity 一覧を取得
pub struct GetOnlineUsersUseCase {
    hub: SharedHub,
}

impl GetOnlineUsersUseCase {
    pub fn new(hub: SharedHub) -> Self {
        Self { hub }
    }

    /// 接続した順で返す
    pub async fn execute(&self) -> Vec<Identity> {
        self.hub.lock().await.online_identities()
    }
}

/// ルームとメンバーの一覧を取得
pub struct GetRoomsUseCase {
    hub: SharedHub,
}

impl GetRoomsUseCase {
    pub fn new(hub: SharedHub) -> Self {
        Self { hub }
    }

    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.hub.lock().await.rooms()
    }
}

/// グローバルメッセージの履歴を取得
pub struct GetHistoryUseCase {
    hub: SharedHub,
}

impl GetHistoryUseCase {
    pub fn new(hub: SharedHub) -> Self {
        Self { hub }
    }

    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.hub.lock().await.history()
    }
}
