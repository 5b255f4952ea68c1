//! Server state shared by the handlers.

use crate::usecase::{Dispatcher, GetHistoryUseCase, GetOnlineUsersUseCase, GetRoomsUseCase};

/// Shared application state
pub struct AppState {
    /// WebSocket イベントの振り分け
    pub dispatcher: Dispatcher,
    pub get_online_users_usecase: GetOnlineUsersUseCase,
    pub get_rooms_usecase: GetRoomsUseCase,
    pub get_history_usecase: GetHistoryUseCase,
}
