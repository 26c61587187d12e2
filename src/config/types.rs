//! Configuration type definitions.

use serde::Deserialize;

use crate::bridge::formatter::{
    DEFAULT_DISCORD_TO_GAME_FORMAT, DEFAULT_GAME_TO_DISCORD_FORMAT,
};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub message: MessageConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token.
    pub token: String,
    /// Relay channel snowflake (kept as a string; validated at startup).
    #[serde(rename = "channel-id")]
    pub channel_id: String,
    /// Role label for members without a role.
    #[serde(rename = "default-role", default = "default_role")]
    pub default_role: String,
    /// Announce bridge online/shutdown in the relay channel.
    #[serde(rename = "status-messages", default)]
    pub status_messages: bool,
    /// Relay player join (and quit) notices.
    #[serde(rename = "player-join-messages", default)]
    pub player_join_messages: bool,
    /// Relay player death notices.
    #[serde(rename = "player-death-messages", default)]
    pub player_death_messages: bool,
    /// Activity strings cycled as the bot's presence.
    #[serde(rename = "status-list", default)]
    pub status_list: Vec<String>,
}

/// Message templates for the two relay directions.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    /// Discord -> game template ($display_name, $handle, $role, $message).
    #[serde(default = "default_discord_template")]
    pub discord: String,
    /// Game -> Discord template ($user_name, $message).
    #[serde(default = "default_minecraft_template")]
    pub minecraft: String,
}

/// Game-link listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Listen address for the companion-plugin connection.
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_role() -> String {
    "member".to_string()
}

fn default_discord_template() -> String {
    DEFAULT_DISCORD_TO_GAME_FORMAT.to_string()
}

fn default_minecraft_template() -> String {
    DEFAULT_GAME_TO_DISCORD_FORMAT.to_string()
}

fn default_listen() -> String {
    "127.0.0.1:25585".to_string()
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            discord: default_discord_template(),
            minecraft: default_minecraft_template(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Config {
    /// Parse the relay channel id. Only valid after `validate_config`.
    pub fn relay_channel_id(&self) -> Option<u64> {
        self.discord.channel_id.parse::<u64>().ok().filter(|id| *id != 0)
    }
}
