//! Room Directory
//!
//! 接続がどのルームに所属しているかを管理します。
//! 1 つの接続が所属するルームは高々 1 つ（所属なし = グローバルチャット）。
//! ルームは最初の入室で作られ、最後のメンバーが抜けると消えます。

use std::collections::{BTreeMap, HashMap};

use super::value_object::{ConnectionId, RoomName};

#[derive(Debug, Clone, Default)]
pub struct RoomDirectory {
    /// 接続 → 所属ルーム
    membership: HashMap<ConnectionId, RoomName>,
    /// ルーム → メンバー（入室順）
    rooms: BTreeMap<RoomName, Vec<ConnectionId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームに入室する
    ///
    /// 既に別のルームに所属している場合は、同じ操作の中でそこから抜けます。
    /// 直前に所属していたルームを返します。
    pub fn join(&mut self, connection: ConnectionId, room: RoomName) -> Option<RoomName> {
        let previous = self.detach(connection);
        self.rooms
            .entry(room.clone())
            .or_default()
            .push(connection);
        self.membership.insert(connection, room);
        previous
    }

    /// グローバルチャットに戻る（どのルームにも所属しない状態にする）
    pub fn join_global(&mut self, connection: ConnectionId) -> Option<RoomName> {
        self.detach(connection)
    }

    pub fn room_of(&self, connection: ConnectionId) -> Option<&RoomName> {
        self.membership.get(&connection)
    }

    pub fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.rooms.get(room).cloned().unwrap_or_default()
    }

    /// 全ルームとそのメンバー（ルーム名順）
    pub fn rooms(&self) -> impl Iterator<Item = (&RoomName, &[ConnectionId])> {
        self.rooms
            .iter()
            .map(|(name, members)| (name, members.as_slice()))
    }

    fn detach(&mut self, connection: ConnectionId) -> Option<RoomName> {
        let previous = self.membership.remove(&connection)?;
        if let Some(members) = self.rooms.get_mut(&previous) {
            members.retain(|member| *member != connection);
            if members.is_empty() {
                self.rooms.remove(&previous);
            }
        }
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_join_adds_member() {
        // テスト項目: 入室するとルームのメンバーに含まれる
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        let conn = ConnectionId::generate();

        // when (操作):
        let previous = directory.join(conn, room("room1"));

        // then (期待する結果):
        assert_eq!(previous, None);
        assert_eq!(directory.members_of(&room("room1")), vec![conn]);
        assert_eq!(directory.room_of(conn), Some(&room("room1")));
    }

    #[test]
    fn test_join_switches_room_atomically() {
        // テスト項目: 別のルームに入室すると、元のルームからは抜けている
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        directory.join(alice, room("room1"));
        directory.join(bob, room("room1"));

        // when (操作):
        let previous = directory.join(alice, room("room2"));

        // then (期待する結果): alice を含むのは room2 だけ
        assert_eq!(previous, Some(room("room1")));
        assert_eq!(directory.members_of(&room("room1")), vec![bob]);
        assert_eq!(directory.members_of(&room("room2")), vec![alice]);
        let containing: Vec<&RoomName> = directory
            .rooms()
            .filter(|(_, members)| members.contains(&alice))
            .map(|(name, _)| name)
            .collect();
        assert_eq!(containing, vec![&room("room2")]);
    }

    #[test]
    fn test_rejoin_same_room_keeps_single_membership() {
        // テスト項目: 同じルームに再入室してもメンバーは重複しない
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        let conn = ConnectionId::generate();
        directory.join(conn, room("room1"));

        // when (操作):
        let previous = directory.join(conn, room("room1"));

        // then (期待する結果):
        assert_eq!(previous, Some(room("room1")));
        assert_eq!(directory.members_of(&room("room1")), vec![conn]);
    }

    #[test]
    fn test_join_global_leaves_room() {
        // テスト項目: グローバルに戻るとルームから抜け、空のルームは消える
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        let conn = ConnectionId::generate();
        directory.join(conn, room("room1"));

        // when (操作):
        let previous = directory.join_global(conn);

        // then (期待する結果):
        assert_eq!(previous, Some(room("room1")));
        assert_eq!(directory.room_of(conn), None);
        assert!(directory.members_of(&room("room1")).is_empty());
        assert_eq!(directory.rooms().count(), 0);
    }

    #[test]
    fn test_join_global_without_room_is_noop() {
        // テスト項目: ルーム未所属でグローバルに戻っても何も起きない
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        let conn = ConnectionId::generate();

        // when (操作):
        let previous = directory.join_global(conn);

        // then (期待する結果):
        assert_eq!(previous, None);
        assert_eq!(directory.rooms().count(), 0);
    }

    #[test]
    fn test_rooms_are_sorted_by_name() {
        // テスト項目: ルーム一覧はルーム名順に並ぶ
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        directory.join(ConnectionId::generate(), room("zeta"));
        directory.join(ConnectionId::generate(), room("alpha"));

        // when (操作):
        let names: Vec<&str> = directory.rooms().map(|(name, _)| name.as_str()).collect();

        // then (期待する結果):
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
