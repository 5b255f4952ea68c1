//! History Buffer
//!
//! 直近のグローバルメッセージを保持するリングバッファ。
//! 新しく接続したクライアントに古い順で再送されます。

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// 保持するメッセージ数のデフォルト
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    capacity: usize,
    messages: VecDeque<ChatMessage>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::new(),
        }
    }

    /// 末尾に追加し、容量を超えた分を先頭から捨てる
    pub fn append(&mut self, message: ChatMessage) {
        if self.capacity == 0 {
            return;
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// 保持しているメッセージ（古い順）
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, MessageBody, Timestamp};

    fn message(n: i64) -> ChatMessage {
        ChatMessage::global(
            Identity::new("alice".to_string()).unwrap(),
            MessageBody::new(format!("message {}", n)).unwrap(),
            Timestamp::new(n),
        )
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        // テスト項目: スナップショットは追加順に並ぶ
        // given (前提条件):
        let mut history = HistoryBuffer::default();

        // when (操作):
        for n in 0..3 {
            history.append(message(n));
        }

        // then (期待する結果):
        let timestamps: Vec<i64> = history
            .snapshot()
            .iter()
            .map(|m| m.timestamp.value())
            .collect();
        assert_eq!(timestamps, vec![0, 1, 2]);
    }

    #[test]
    fn test_append_150_keeps_last_100() {
        // テスト項目: 150 件追加すると最後の 100 件だけが元の順序で残る
        // given (前提条件):
        let mut history = HistoryBuffer::default();

        // when (操作):
        for n in 0..150 {
            history.append(message(n));
        }

        // then (期待する結果):
        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), DEFAULT_HISTORY_CAPACITY);
        let timestamps: Vec<i64> = snapshot.iter().map(|m| m.timestamp.value()).collect();
        assert_eq!(timestamps, (50..150).collect::<Vec<i64>>());
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        // テスト項目: 容量 0 の場合は何も保持しない
        // given (前提条件):
        let mut history = HistoryBuffer::new(0);

        // when (操作):
        history.append(message(1));

        // then (期待する結果):
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 0);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        // テスト項目: 非常に大きな容量を指定しても生成時に確保せず、追加した分だけ保持する
        // given (前提条件):
        let mut history = HistoryBuffer::new(usize::MAX / 2);

        // when (操作):
        for n in 0..3 {
            history.append(message(n));
        }

        // then (期待する結果):
        assert_eq!(history.len(), 3);
        assert_eq!(history.capacity(), usize::MAX / 2);
    }
}
