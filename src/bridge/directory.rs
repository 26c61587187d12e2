//! Reply-target routing table.
//!
//! Tracks which Discord user each player is currently corresponding with, so
//! that `reply` from the game side and direct messages from the Discord side
//! both resolve to the right counterpart.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::common::types::{PlayerId, RemoteUser, ReplyBinding};

/// Concurrent map from player to their current reply target.
///
/// At most one binding per player; a new `bind` overwrites the old one. One
/// Discord user may hold bindings with several players at once. Bindings are
/// never expired or removed automatically - a failed delivery keeps the
/// binding so the player can retry once the user's DM settings change.
///
/// Cheap to clone; all clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct ReplyDirectory {
    inner: Arc<RwLock<BTreeMap<PlayerId, ReplyBinding>>>,
}

impl ReplyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the binding for `player`. Always succeeds.
    pub fn bind(&self, player: PlayerId, user: &RemoteUser) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(player, ReplyBinding::new(user.id, user.handle.clone()));
    }

    /// Current binding for `player`, if any.
    pub fn lookup_by_player(&self, player: PlayerId) -> Option<ReplyBinding> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&player).cloned()
    }

    /// First binding pointing at `user_id`, if any.
    ///
    /// When several players are bound to the same Discord user, the BTreeMap
    /// ordering makes the result stable for a static table (lowest player id
    /// wins).
    pub fn lookup_by_remote_user(&self, user_id: u64) -> Option<(PlayerId, ReplyBinding)> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.iter()
            .find(|(_, binding)| binding.user_id == user_id)
            .map(|(player, binding)| (*player, binding.clone()))
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_bind_and_lookup() {
        let directory = ReplyDirectory::new();
        let player = Uuid::new_v4();
        let user = RemoteUser::new(42, "someone");

        directory.bind(player, &user);

        let binding = directory.lookup_by_player(player).expect("binding present");
        assert_eq!(binding.user_id, 42);
        assert_eq!(binding.handle, "someone");
    }

    #[test]
    fn test_lookup_missing_player() {
        let directory = ReplyDirectory::new();
        assert!(directory.lookup_by_player(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_rebind_overwrites() {
        let directory = ReplyDirectory::new();
        let player = Uuid::new_v4();

        directory.bind(player, &RemoteUser::new(1, "first"));
        directory.bind(player, &RemoteUser::new(2, "second"));

        let binding = directory.lookup_by_player(player).expect("binding present");
        assert_eq!(binding.user_id, 2);
        assert_eq!(binding.handle, "second");
        assert_eq!(directory.len(), 1);

        // The old user no longer resolves to this player.
        assert!(directory.lookup_by_remote_user(1).is_none());
    }

    #[test]
    fn test_reverse_lookup() {
        let directory = ReplyDirectory::new();
        let player = Uuid::new_v4();
        directory.bind(player, &RemoteUser::new(7, "seven"));

        let (found, binding) = directory
            .lookup_by_remote_user(7)
            .expect("reverse lookup resolves");
        assert_eq!(found, player);
        assert_eq!(binding.handle, "seven");
    }

    #[test]
    fn test_reverse_lookup_is_deterministic_among_ties() {
        let directory = ReplyDirectory::new();
        let mut players: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        for player in &players {
            directory.bind(*player, &RemoteUser::new(99, "shared"));
        }
        players.sort();

        // Repeated lookups on a static table return the same (lowest) player.
        for _ in 0..10 {
            let (found, _) = directory.lookup_by_remote_user(99).expect("resolves");
            assert_eq!(found, players[0]);
        }
    }

    #[test]
    fn test_concurrent_binds_do_not_corrupt() {
        let directory = ReplyDirectory::new();
        let players: Vec<Uuid> = (0..16).map(|_| Uuid::new_v4()).collect();

        let handles: Vec<_> = players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let directory = directory.clone();
                let player = *player;
                std::thread::spawn(move || {
                    for round in 0..100 {
                        let user = RemoteUser::new(i as u64, format!("user-{}-{}", i, round));
                        directory.bind(player, &user);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        // Final consistency scan: every player holds exactly the binding its
        // own writer wrote last.
        assert_eq!(directory.len(), players.len());
        for (i, player) in players.iter().enumerate() {
            let binding = directory.lookup_by_player(*player).expect("binding present");
            assert_eq!(binding.user_id, i as u64);
            assert_eq!(binding.handle, format!("user-{}-99", i));
        }
    }
}
