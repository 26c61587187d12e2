//! Wire protocol for the companion-plugin link.
//!
//! The game server side runs a small plugin that connects to the bridge and
//! exchanges newline-delimited JSON: events flow in, delivery commands flow
//! out. Tagged enums keep the dispatch closed and exhaustive.

use serde::{Deserialize, Serialize};

use crate::common::types::PlayerId;

/// A player reference as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

/// Why a player left the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitReason {
    Disconnected,
    TimedOut,
    ErroneousState,
    Kicked,
}

impl QuitReason {
    /// Relay-channel phrase for this quit reason.
    ///
    /// The TimedOut/ErroneousState/Kicked phrases are intentionally
    /// transposed relative to their names; live servers rely on the existing
    /// wording, so do not "fix" the mapping here.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Disconnected => "has left the server!",
            Self::TimedOut => "has been kicked due to an unexpected error.",
            Self::ErroneousState => "has been timed out.",
            Self::Kicked => "has been kicked.",
        }
    }
}

/// Events reported by the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Public chat line from a player.
    Chat { player: PlayerRef, message: String },
    /// Player joined the server.
    Join { player: PlayerRef },
    /// Player left the server.
    Quit {
        player: PlayerRef,
        reason: QuitReason,
    },
    /// Player died; `death_message` is the full platform-rendered sentence,
    /// starting with the player's name.
    Death {
        player: PlayerRef,
        death_message: String,
    },
    /// Raw command input typed by a player (without the leading slash).
    Command { player: PlayerRef, input: String },
}

/// Delivery commands sent to the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameCommand {
    /// Show text to every online player.
    Broadcast { message: String },
    /// Show text to one online player.
    Tell { player: PlayerId, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_wire_format() {
        let line = r#"{"event":"quit","player":{"id":"6bdd2c82-8ad9-4a17-9a9c-e97b01bb20ed","name":"Steve"},"reason":"timed_out"}"#;
        let event: GameEvent = serde_json::from_str(line).expect("valid event line");
        assert_eq!(
            event,
            GameEvent::Quit {
                player: PlayerRef {
                    id: "6bdd2c82-8ad9-4a17-9a9c-e97b01bb20ed".parse().unwrap(),
                    name: "Steve".to_string(),
                },
                reason: QuitReason::TimedOut,
            }
        );
    }

    #[test]
    fn test_command_wire_format() {
        let player: Uuid = "6bdd2c82-8ad9-4a17-9a9c-e97b01bb20ed".parse().unwrap();
        let json = serde_json::to_string(&GameCommand::Tell {
            player,
            message: "hi".to_string(),
        })
        .expect("serializes");
        assert_eq!(
            json,
            r#"{"command":"tell","player":"6bdd2c82-8ad9-4a17-9a9c-e97b01bb20ed","message":"hi"}"#
        );
    }

    #[test]
    fn test_quit_phrases() {
        assert_eq!(QuitReason::Disconnected.phrase(), "has left the server!");
        assert_eq!(
            QuitReason::TimedOut.phrase(),
            "has been kicked due to an unexpected error."
        );
        assert_eq!(QuitReason::ErroneousState.phrase(), "has been timed out.");
        assert_eq!(QuitReason::Kicked.phrase(), "has been kicked.");
    }
}
