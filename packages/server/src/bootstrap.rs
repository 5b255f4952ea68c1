//! Dependency wiring.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    config::ServerConfig,
    domain::{ChatHub, MessagePusher},
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::{AppState, Server},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, Dispatcher, GetHistoryUseCase,
        GetOnlineUsersUseCase, GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
        TypingUseCase,
    },
};

/// 設定から Server を組み立てる
///
/// Initialize dependencies in order:
/// 1. ChatHub
/// 2. MessagePusher
/// 3. UseCases
/// 4. AppState
/// 5. Server
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Create ChatHub (in-memory state)
    let hub = ChatHub::new(config.history_capacity, config.typing_timeout).shared();

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let dispatcher = Dispatcher::new(
        ConnectClientUseCase::new(hub.clone(), message_pusher.clone()),
        DisconnectClientUseCase::new(hub.clone(), message_pusher.clone(), clock.clone()),
        SendMessageUseCase::new(hub.clone(), message_pusher.clone(), clock.clone()),
        JoinRoomUseCase::new(hub.clone(), message_pusher.clone(), clock.clone()),
        Arc::new(TypingUseCase::new(hub.clone(), message_pusher, clock)),
    );

    // 4. Create AppState
    let state = AppState {
        dispatcher,
        get_online_users_usecase: GetOnlineUsersUseCase::new(hub.clone()),
        get_rooms_usecase: GetRoomsUseCase::new(hub.clone()),
        get_history_usecase: GetHistoryUseCase::new(hub),
    };

    // 5. Create the server
    Server::new(state, config.typing_sweep_interval)
}
