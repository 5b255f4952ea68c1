//! Server configuration.

use std::time::Duration;

use crate::domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_TYPING_TIMEOUT};

/// サーバーの設定値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 保持するグローバルメッセージの件数
    pub history_capacity: usize,
    /// 入力中状態を自動解除するまでの時間
    pub typing_timeout: Duration,
    /// 期限切れの入力中状態を掃除する間隔
    pub typing_sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            typing_timeout: DEFAULT_TYPING_TIMEOUT,
            typing_sweep_interval: Duration::from_secs(1),
        }
    }
}
