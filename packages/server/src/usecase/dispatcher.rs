//! Dispatcher
//!
//! 接続ごとに届いたイベントを対応する UseCase に振り分けます。
//! トランスポート（WebSocket）からはこの型だけが見えます。

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, InboundEvent, PusherChannel};

use super::{
    ConnectClientUseCase, ConnectError, DisconnectClientUseCase, JoinRoomUseCase,
    SendMessageUseCase, TypingUseCase,
};

pub struct Dispatcher {
    connect_client: ConnectClientUseCase,
    disconnect_client: DisconnectClientUseCase,
    send_message: SendMessageUseCase,
    join_room: JoinRoomUseCase,
    typing: Arc<TypingUseCase>,
}

impl Dispatcher {
    pub fn new(
        connect_client: ConnectClientUseCase,
        disconnect_client: DisconnectClientUseCase,
        send_message: SendMessageUseCase,
        join_room: JoinRoomUseCase,
        typing: Arc<TypingUseCase>,
    ) -> Self {
        Self {
            connect_client,
            disconnect_client,
            send_message,
            join_room,
            typing,
        }
    }

    pub async fn connect(
        &self,
        identity: Identity,
        sender: PusherChannel,
    ) -> Result<ConnectionId, ConnectError> {
        self.connect_client.execute(identity, sender).await
    }

    /// 1 つのイベントを処理する
    pub async fn handle(&self, connection: ConnectionId, event: InboundEvent) {
        match event {
            InboundEvent::Message { body } => {
                self.send_message.send_global(connection, body).await;
            }
            InboundEvent::RoomMessage { body } => {
                self.send_message.send_room(connection, body).await;
            }
            InboundEvent::PrivateMessage { to, body } => {
                self.send_message.send_private(connection, to, body).await;
            }
            InboundEvent::JoinRoom(room) => self.join_room.join(connection, room).await,
            InboundEvent::LeaveRoom => {
                self.join_room.leave(connection).await;
            }
            InboundEvent::Typing => self.typing.start(connection).await,
            InboundEvent::StopTyping => self.typing.stop(connection).await,
        }
    }

    pub async fn disconnect(&self, connection: ConnectionId) -> Option<Identity> {
        self.disconnect_client.execute(connection).await
    }

    /// 期限切れの掃除タスクを起動するために共有する
    pub fn typing(&self) -> Arc<TypingUseCase> {
        self.typing.clone()
    }
}
