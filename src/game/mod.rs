//! Game-server integration: wire protocol, link listener, roster and
//! in-game command parsing.

pub mod commands;
pub mod listener;
pub mod protocol;
pub mod roster;

pub use listener::GameListener;
pub use protocol::{GameCommand, GameEvent, PlayerRef, QuitReason};
pub use roster::Roster;
