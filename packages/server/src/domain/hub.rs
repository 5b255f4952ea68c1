//! ChatHub ドメインモデル
//!
//! Connection Registry・Room Directory・Typing Tracker・History Buffer を 1 つにまとめた集約。
//! 各メソッドが 1 回の状態遷移に対応し、遷移の結果として
//! 「誰に何を届けるか」（`Delivery` のリスト）を返します。
//!
//! 実際の送信は行いません。送信は UseCase 層が `MessagePusher` を使って行います。
//!
//! ## 不変条件
//!
//! - 1 つの Identity に対応する接続は高々 1 つ
//! - 接続が所属するルームは高々 1 つ。ルームの切り替えは 1 回の操作で完結する
//! - 履歴に入るのはグローバルメッセージのみ
//! - 切断処理は接続ごとに 1 回だけ効果を持つ

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use super::{
    entity::{ChatMessage, Delivery, Notification, RoomSummary, SystemKind},
    error::ClaimError,
    history::HistoryBuffer,
    registry::ConnectionRegistry,
    room_directory::RoomDirectory,
    typing::TypingTracker,
    value_object::{ConnectionId, Identity, MessageBody, RoomName, Timestamp},
};

/// UseCase 間で共有される ChatHub
///
/// 全ての状態遷移はこの Mutex の中で 1 つずつ実行されます。
pub type SharedHub = Arc<Mutex<ChatHub>>;

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub identity: Identity,
    /// 切断時に所属していたルーム
    pub room: Option<RoomName>,
    pub deliveries: Vec<Delivery>,
}

/// 履歴 100 件・入力中タイムアウト 5 秒の `Default` を持つ
#[derive(Debug, Clone, Default)]
pub struct ChatHub {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    typing: TypingTracker,
    history: HistoryBuffer,
}

impl ChatHub {
    pub fn new(history_capacity: usize, typing_timeout: Duration) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory: RoomDirectory::new(),
            typing: TypingTracker::new(typing_timeout),
            history: HistoryBuffer::new(history_capacity),
        }
    }

    pub fn shared(self) -> SharedHub {
        Arc::new(Mutex::new(self))
    }

    // ========================================
    // 接続・切断
    // ========================================

    /// Identity を claim する
    ///
    /// 成功すると、全接続（新しい接続を含む）への presence と、
    /// 新しい接続への履歴の再送（1 件ずつ、古い順）を返します。
    pub fn connect(
        &mut self,
        identity: Identity,
        connection: ConnectionId,
    ) -> Result<Vec<Delivery>, ClaimError> {
        self.registry.claim(identity, connection)?;

        let mut deliveries = vec![self.presence()];
        deliveries.extend(
            self.history
                .snapshot()
                .into_iter()
                .map(|message| Delivery::new(vec![connection], Notification::Chat(message))),
        );
        Ok(deliveries)
    }

    /// 接続を切断する
    ///
    /// 1. 所属ルームの残りのメンバーへ退室アナウンス
    /// 2. Registry から削除し、残りの全接続へ presence
    /// 3. 入力中だった場合は残りの全接続へ stopTyping
    ///
    /// claim されていない（または切断済みの）接続に対しては `None` を返します。
    pub fn disconnect(&mut self, connection: ConnectionId, now: Timestamp) -> Option<Departure> {
        let identity = self.registry.identity_of(connection)?.clone();
        let mut deliveries = Vec::new();

        let room = self.directory.join_global(connection);
        if let Some(room) = &room {
            let remaining = self.directory.members_of(room);
            if !remaining.is_empty() {
                let leave = ChatMessage::room_announcement(
                    &identity,
                    room.clone(),
                    SystemKind::Leave,
                    now,
                );
                deliveries.push(Delivery::new(remaining, Notification::Chat(leave)));
            }
        }

        self.registry.release(&identity, connection);
        deliveries.push(self.presence());

        if self.typing.stop(&identity) {
            deliveries.push(Delivery::new(
                self.registry.connections(),
                Notification::StopTyping(identity.clone()),
            ));
        }

        Some(Departure {
            identity,
            room,
            deliveries,
        })
    }

    // ========================================
    // メッセージ
    // ========================================

    /// グローバルメッセージ: 送信者以外の全接続へ。履歴に残る
    pub fn send_global(
        &mut self,
        connection: ConnectionId,
        body: MessageBody,
        now: Timestamp,
    ) -> Vec<Delivery> {
        let Some(sender) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        let message = ChatMessage::global(sender, body, now);
        self.history.append(message.clone());

        vec![Delivery::new(
            self.registry.connections_except(connection),
            Notification::Chat(message),
        )]
    }

    /// ルームメッセージ: 送信者を含むルームの全メンバーへ
    ///
    /// ルームに所属していない場合は何も届けません。
    pub fn send_room(
        &mut self,
        connection: ConnectionId,
        body: MessageBody,
        now: Timestamp,
    ) -> Vec<Delivery> {
        let Some(sender) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        let Some(room) = self.directory.room_of(connection).cloned() else {
            return Vec::new();
        };
        let recipients = self.directory.members_of(&room);
        let message = ChatMessage::room(sender, room, body, now);

        vec![Delivery::new(recipients, Notification::Chat(message))]
    }

    /// プライベートメッセージ: 宛先と送信者へ
    ///
    /// 宛先がオフラインの場合は何も届けません（キューにも残りません）。
    pub fn send_private(
        &mut self,
        connection: ConnectionId,
        to: Identity,
        body: MessageBody,
        now: Timestamp,
    ) -> Vec<Delivery> {
        let Some(sender) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        let Some(target) = self.registry.lookup(&to) else {
            return Vec::new();
        };
        let mut recipients = vec![target];
        if target != connection {
            recipients.push(connection);
        }
        let message = ChatMessage::private(sender, to, body, now);

        vec![Delivery::new(recipients, Notification::Chat(message))]
    }

    // ========================================
    // ルーム
    // ========================================

    /// ルームに入室する
    ///
    /// 元のルームからは黙って抜け、新しいルームの全メンバー（本人を含む）に入室アナウンスを届けます。
    pub fn join_room(
        &mut self,
        connection: ConnectionId,
        room: RoomName,
        now: Timestamp,
    ) -> Vec<Delivery> {
        let Some(identity) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        self.directory.join(connection, room.clone());
        let recipients = self.directory.members_of(&room);
        let announcement = ChatMessage::room_announcement(&identity, room, SystemKind::Join, now);

        vec![Delivery::new(recipients, Notification::Chat(announcement))]
    }

    /// グローバルチャットに戻る。アナウンスはしない
    pub fn leave_room(&mut self, connection: ConnectionId) -> Option<RoomName> {
        self.registry.identity_of(connection)?;
        self.directory.join_global(connection)
    }

    // ========================================
    // 入力中
    // ========================================

    /// 入力中: 送信者以外の全接続へ
    pub fn start_typing(&mut self, connection: ConnectionId, now: Timestamp) -> Vec<Delivery> {
        let Some(identity) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        self.typing.start(identity.clone(), now);

        vec![Delivery::new(
            self.registry.connections_except(connection),
            Notification::Typing(identity),
        )]
    }

    /// 入力終了: 送信者以外の全接続へ
    pub fn stop_typing(&mut self, connection: ConnectionId) -> Vec<Delivery> {
        let Some(identity) = self.registry.identity_of(connection).cloned() else {
            return Vec::new();
        };
        self.typing.stop(&identity);

        vec![Delivery::new(
            self.registry.connections_except(connection),
            Notification::StopTyping(identity),
        )]
    }

    /// タイムアウトした入力中状態を解除し、本人以外の全接続へ stopTyping を届ける
    pub fn expire_typing(&mut self, now: Timestamp) -> Vec<Delivery> {
        self.typing
            .expire(now)
            .into_iter()
            .map(|identity| {
                let recipients = match self.registry.lookup(&identity) {
                    Some(connection) => self.registry.connections_except(connection),
                    None => self.registry.connections(),
                };
                Delivery::new(recipients, Notification::StopTyping(identity))
            })
            .collect()
    }

    // ========================================
    // 参照
    // ========================================

    pub fn online_identities(&self) -> Vec<Identity> {
        self.registry.list_identities()
    }

    pub fn identity_of(&self, connection: ConnectionId) -> Option<&Identity> {
        self.registry.identity_of(connection)
    }

    pub fn room_of(&self, connection: ConnectionId) -> Option<&RoomName> {
        self.directory.room_of(connection)
    }

    pub fn typing_identities(&self) -> Vec<Identity> {
        self.typing.typing_identities()
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.snapshot()
    }

    /// ルーム一覧（ルーム名順、メンバーは入室順）
    pub fn rooms(&self) -> Vec<RoomSummary> {
        self.directory
            .rooms()
            .map(|(name, members)| RoomSummary {
                name: name.clone(),
                members: members
                    .iter()
                    .filter_map(|connection| self.registry.identity_of(*connection).cloned())
                    .collect(),
            })
            .collect()
    }

    fn presence(&self) -> Delivery {
        Delivery::new(
            self.registry.connections(),
            Notification::OnlineUsers(self.registry.list_identities()),
        )
    }
}
