//! Discord side of the relay: serenity client, event handling, slash
//! commands, presence cycling, and outbound delivery.

pub mod client;
pub mod commands;
pub mod gateway;
pub mod handler;
pub mod status;

pub use client::{build_client, DiscordBot, DiscordBotEvent};
pub use gateway::BridgeGateway;
pub use handler::RelayHandler;
