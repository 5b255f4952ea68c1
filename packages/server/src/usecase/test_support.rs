//! UseCase テスト用のヘルパー

use std::sync::Arc;

use hiroba_shared::time::{Clock, FixedClock};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatHub, ConnectionId, Identity, MessagePusher, SharedHub},
    infrastructure::{dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher},
    usecase::ConnectClientUseCase,
};

pub const NOW: i64 = 1_700_000_000_000;

pub fn create_test_hub() -> SharedHub {
    ChatHub::default().shared()
}

pub fn create_test_message_pusher() -> Arc<dyn MessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

pub fn create_test_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(NOW))
}

pub fn identity(name: &str) -> Identity {
    Identity::new(name.to_string()).unwrap()
}

/// 接続し、その接続に届くイベントの受信側を返す
pub async fn connect(
    usecase: &ConnectClientUseCase,
    name: &str,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = usecase.execute(identity(name), tx).await.unwrap();
    (connection, rx)
}

/// 受信済みのイベントを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}
