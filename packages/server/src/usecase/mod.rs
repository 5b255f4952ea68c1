//! UseCase layer
//!
//! ChatHub の状態遷移を 1 つずつ実行し、結果の `Delivery` を MessagePusher に流します。
//! 遷移と配信は同じロックの中で行うため、全てのクライアントが同じ順序でイベントを受け取ります。

mod connect_client;
mod delivery;
mod disconnect_client;
mod dispatcher;
mod error;
mod join_room;
mod query;
mod send_message;
#[cfg(test)]
mod test_support;
mod typing;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use dispatcher::Dispatcher;
pub use error::ConnectError;
pub use join_room::JoinRoomUseCase;
pub use query::{GetHistoryUseCase, GetOnlineUsersUseCase, GetRoomsUseCase};
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
