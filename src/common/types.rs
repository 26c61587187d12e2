//! Shared identity types used across the application.

use uuid::Uuid;

/// Unique identifier for a Minecraft player account.
///
/// Stable per account (not per session); assigned by the game platform.
pub type PlayerId = Uuid;

/// A Discord user addressable for direct messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    /// Discord user snowflake.
    pub id: u64,
    /// Display handle at the time the user was seen.
    pub handle: String,
}

impl RemoteUser {
    pub fn new(id: u64, handle: impl Into<String>) -> Self {
        Self {
            id,
            handle: handle.into(),
        }
    }
}

/// The reply target currently associated with a player.
///
/// Created when a Discord user first messages a player via `/msg`; consulted
/// when that player runs `reply`. A newer binding for the same player replaces
/// the old one; a binding is never removed on delivery failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyBinding {
    /// Discord user snowflake to deliver replies to.
    pub user_id: u64,
    /// Handle shown to the player in notices.
    pub handle: String,
}

impl ReplyBinding {
    pub fn new(user_id: u64, handle: impl Into<String>) -> Self {
        Self {
            user_id,
            handle: handle.into(),
        }
    }
}

/// An outbound in-game-to-Discord private message, built per reply invocation.
#[derive(Debug, Clone)]
pub struct PrivateMessage {
    pub sender: PlayerId,
    pub sender_name: String,
    /// Discord user snowflake of the recipient.
    pub recipient: u64,
    pub body: String,
}
