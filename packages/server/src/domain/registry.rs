//! Connection Registry
//!
//! 接続中の Identity と ConnectionId の対応表。
//! 1 つの Identity に対応する接続は常に高々 1 つです。
//! 既に使われている Identity での claim は拒否します（後勝ちにはしない）。

use super::{
    error::ClaimError,
    value_object::{ConnectionId, Identity},
};

/// Identity → ConnectionId の対応表（claim 順を保持）
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    entries: Vec<(Identity, ConnectionId)>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity を接続に割り当てる
    ///
    /// # Errors
    ///
    /// * `ClaimError::AlreadyConnected` - 同じ Identity の接続が存在する
    /// * `ClaimError::ConnectionAlreadyClaimed` - この接続は既に claim 済み
    pub fn claim(
        &mut self,
        identity: Identity,
        connection: ConnectionId,
    ) -> Result<(), ClaimError> {
        if self.lookup(&identity).is_some() {
            return Err(ClaimError::AlreadyConnected(identity.into_string()));
        }
        if let Some(claimed) = self.identity_of(connection) {
            return Err(ClaimError::ConnectionAlreadyClaimed(
                claimed.as_str().to_string(),
            ));
        }
        self.entries.push((identity, connection));
        Ok(())
    }

    /// 対応を解除する
    ///
    /// Identity が `connection` に割り当てられている場合のみ削除します。
    /// 何も削除しなかった場合は `false` を返します（冪等）。
    pub fn release(&mut self, identity: &Identity, connection: ConnectionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, conn)| !(id == identity && *conn == connection));
        self.entries.len() != before
    }

    pub fn lookup(&self, identity: &Identity) -> Option<ConnectionId> {
        self.entries
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, conn)| *conn)
    }

    pub fn identity_of(&self, connection: ConnectionId) -> Option<&Identity> {
        self.entries
            .iter()
            .find(|(_, conn)| *conn == connection)
            .map(|(id, _)| id)
    }

    /// 接続中の Identity 一覧（claim 順）
    pub fn list_identities(&self) -> Vec<Identity> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn connections(&self) -> Vec<ConnectionId> {
        self.entries.iter().map(|(_, conn)| *conn).collect()
    }

    /// `exclude` 以外の全ての接続
    pub fn connections_except(&self, exclude: ConnectionId) -> Vec<ConnectionId> {
        self.entries
            .iter()
            .map(|(_, conn)| *conn)
            .filter(|conn| *conn != exclude)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_claim_success() {
        // テスト項目: 新しい Identity を claim できる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();

        // when (操作):
        let result = registry.claim(identity("alice"), conn);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(registry.lookup(&identity("alice")), Some(conn));
        assert_eq!(registry.identity_of(conn), Some(&identity("alice")));
    }

    #[test]
    fn test_claim_duplicate_identity_rejects_newcomer() {
        // テスト項目: 既に接続中の Identity での claim は拒否され、既存の接続は残る
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        registry.claim(identity("alice"), first).unwrap();

        // when (操作):
        let result = registry.claim(identity("alice"), second);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ClaimError::AlreadyConnected("alice".to_string()))
        );
        assert_eq!(registry.lookup(&identity("alice")), Some(first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_claim_twice_on_same_connection_is_rejected() {
        // テスト項目: 1 つの接続で 2 つ目の Identity は claim できない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();
        registry.claim(identity("alice"), conn).unwrap();

        // when (操作):
        let result = registry.claim(identity("bob"), conn);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ClaimError::ConnectionAlreadyClaimed("alice".to_string()))
        );
        assert_eq!(registry.list_identities(), vec![identity("alice")]);
    }

    #[test]
    fn test_release_is_idempotent() {
        // テスト項目: 同じ接続を 2 回 release しても 2 回目は何もしない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();
        registry.claim(identity("alice"), conn).unwrap();

        // when (操作):
        let first = registry.release(&identity("alice"), conn);
        let second = registry.release(&identity("alice"), conn);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stale_release_does_not_remove_new_owner() {
        // テスト項目: 古い接続の release は、再接続した新しい接続の対応を消さない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let old = ConnectionId::generate();
        let new = ConnectionId::generate();
        registry.claim(identity("alice"), old).unwrap();
        registry.release(&identity("alice"), old);
        registry.claim(identity("alice"), new).unwrap();

        // when (操作):
        let released = registry.release(&identity("alice"), old);

        // then (期待する結果):
        assert!(!released);
        assert_eq!(registry.lookup(&identity("alice")), Some(new));
    }

    #[test]
    fn test_list_identities_matches_claim_release_history() {
        // テスト項目: claim/release の列の後、一覧は release されていない Identity と一致する
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let names = ["alice", "bob", "charlie", "dave"];
        let conns: Vec<ConnectionId> = names.iter().map(|_| ConnectionId::generate()).collect();
        for (name, conn) in names.iter().zip(&conns) {
            registry.claim(identity(name), *conn).unwrap();
        }

        // when (操作):
        registry.release(&identity("bob"), conns[1]);
        registry.release(&identity("dave"), conns[3]);
        let bob_again = ConnectionId::generate();
        registry.claim(identity("bob"), bob_again).unwrap();
        registry.release(&identity("eve"), ConnectionId::generate());

        // then (期待する結果): claim 順（bob は再 claim により末尾）
        assert_eq!(
            registry.list_identities(),
            vec![identity("alice"), identity("charlie"), identity("bob")]
        );
    }

    #[test]
    fn test_connections_except() {
        // テスト項目: 指定した接続以外の全接続が返される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        registry.claim(identity("alice"), alice).unwrap();
        registry.claim(identity("bob"), bob).unwrap();

        // when (操作):
        let targets = registry.connections_except(alice);

        // then (期待する結果):
        assert_eq!(targets, vec![bob]);
        assert_eq!(registry.connections(), vec![alice, bob]);
    }
}
