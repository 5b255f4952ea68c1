//! UseCase: ルームの入室・退室
//!
//! 入室はアナウンスを伴い、退室（グローバルへの復帰）は黙って行われます。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, RoomName, SharedHub};

use super::delivery::{deliver, now};

pub struct JoinRoomUseCase {
    hub: SharedHub,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// ルームに入室する（元のルームからは黙って抜ける）
    pub async fn join(&self, connection: ConnectionId, room: RoomName) {
        let mut hub = self.hub.lock().await;
        let previous = hub.room_of(connection).cloned();
        let deliveries = hub.join_room(connection, room.clone(), now(self.clock.as_ref()));
        deliver(self.message_pusher.as_ref(), deliveries).await;

        tracing::debug!(
            "{} moved from {:?} to '{}'",
            connection,
            previous.as_ref().map(RoomName::as_str),
            room
        );
    }

    /// グローバルチャットに戻る
    ///
    /// 抜けたルームを返します。
    pub async fn leave(&self, connection: ConnectionId) -> Option<RoomName> {
        let left = self.hub.lock().await.leave_room(connection);
        if let Some(room) = &left {
            tracing::debug!("{} left '{}'", connection, room);
        }
        left
    }
}
