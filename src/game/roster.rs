//! Online player roster.
//!
//! The bridge runs outside the game server, so it keeps its own snapshot of
//! who is online, fed by join/quit events from the game link.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::common::types::PlayerId;

/// Concurrent map of online players. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    inner: Arc<RwLock<HashMap<PlayerId, String>>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a player as online.
    pub fn insert(&self, player: PlayerId, name: impl Into<String>) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(player, name.into());
    }

    /// Record a player as offline.
    pub fn remove(&self, player: PlayerId) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&player);
    }

    pub fn is_online(&self, player: PlayerId) -> bool {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.contains_key(&player)
    }

    /// Display name of an online player.
    pub fn name_of(&self, player: PlayerId) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&player).cloned()
    }

    /// Resolve an online player by name, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<(PlayerId, String)> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, n)| (*id, n.clone()))
    }

    /// Sorted snapshot of online player names.
    pub fn names(&self) -> Vec<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = map.values().cloned().collect();
        names.sort();
        names
    }

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
    fn test_insert_and_remove() {
        let roster = Roster::new();
        let player = Uuid::new_v4();

        roster.insert(player, "Steve");
        assert!(roster.is_online(player));
        assert_eq!(roster.name_of(player).as_deref(), Some("Steve"));

        roster.remove(player);
        assert!(!roster.is_online(player));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let roster = Roster::new();
        let player = Uuid::new_v4();
        roster.insert(player, "Herobrine");

        let (found, name) = roster.find_by_name("herobrine").expect("resolves");
        assert_eq!(found, player);
        assert_eq!(name, "Herobrine");
        assert!(roster.find_by_name("notch").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let roster = Roster::new();
        roster.insert(Uuid::new_v4(), "Charlie");
        roster.insert(Uuid::new_v4(), "Alice");
        roster.insert(Uuid::new_v4(), "Bob");

        assert_eq!(roster.names(), vec!["Alice", "Bob", "Charlie"]);
    }
}
