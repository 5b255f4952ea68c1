//! Typing Tracker
//!
//! 入力中の Identity の集合。ルームに関係なくグローバルに共有されます。
//! 明示的な stop、切断、またはタイムアウトでエントリが消えます。

use std::{collections::HashMap, time::Duration};

use super::value_object::{Identity, Timestamp};

/// サーバー側で入力中状態を自動解除するまでの時間
pub const DEFAULT_TYPING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct TypingTracker {
    timeout_millis: i64,
    /// Identity → 最後に typing を受け取った時刻
    entries: HashMap<Identity, Timestamp>,
}

impl Default for TypingTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_TIMEOUT)
    }
}

impl TypingTracker {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout_millis: i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX),
            entries: HashMap::new(),
        }
    }

    /// 入力中にする（既に入力中なら期限を延長する）
    ///
    /// 新しく追加された場合は `true` を返します。
    pub fn start(&mut self, identity: Identity, now: Timestamp) -> bool {
        self.entries.insert(identity, now).is_none()
    }

    /// 入力中を解除する。入力中でなかった場合は `false`
    pub fn stop(&mut self, identity: &Identity) -> bool {
        self.entries.remove(identity).is_some()
    }

    pub fn is_typing(&self, identity: &Identity) -> bool {
        self.entries.contains_key(identity)
    }

    /// 入力中の Identity 一覧（名前順）
    pub fn typing_identities(&self) -> Vec<Identity> {
        let mut identities: Vec<Identity> = self.entries.keys().cloned().collect();
        identities.sort();
        identities
    }

    /// タイムアウトしたエントリを取り除き、その Identity を名前順で返す
    pub fn expire(&mut self, now: Timestamp) -> Vec<Identity> {
        let timeout = self.timeout_millis;
        let mut expired: Vec<Identity> = self
            .entries
            .iter()
            .filter(|(_, last)| now.millis_since(**last) >= timeout)
            .map(|(identity, _)| identity.clone())
            .collect();
        for identity in &expired {
            self.entries.remove(identity);
        }
        expired.sort();
        expired
    }
}
