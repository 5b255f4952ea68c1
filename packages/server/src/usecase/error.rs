//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ClaimError;

/// 接続（Identity の claim）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ Identity が既に接続中（新しい接続を拒否する）
    #[error("identity '{0}' is already connected")]
    DuplicateIdentity(String),
}

impl From<ClaimError> for ConnectError {
    fn from(error: ClaimError) -> Self {
        match error {
            ClaimError::AlreadyConnected(identity) => ConnectError::DuplicateIdentity(identity),
            // ConnectionId は UseCase 内で毎回新しく発行するため、実際には起きない
            ClaimError::ConnectionAlreadyClaimed(identity) => {
                ConnectError::DuplicateIdentity(identity)
            }
        }
    }
}
