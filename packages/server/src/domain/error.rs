//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("identity must not be empty")]
    EmptyIdentity,
    #[error("room name must not be empty")]
    EmptyRoomName,
    #[error("message body must not be empty")]
    EmptyMessageBody,
}

/// Identity の claim に失敗した理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// 同じ Identity を持つ接続が既に存在する
    #[error("identity '{0}' is already connected")]
    AlreadyConnected(String),
    /// この接続は既に別の Identity を claim 済み
    #[error("connection has already claimed identity '{0}'")]
    ConnectionAlreadyClaimed(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
