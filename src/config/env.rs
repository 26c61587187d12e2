//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `LODESTONE_DISCORD_TOKEN` - Discord bot token
//! - `LODESTONE_CHANNEL_ID` - relay channel snowflake
//! - `LODESTONE_GAME_LISTEN` - game-link listen address
//! - `LODESTONE_CONFIG` - config file path

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "LODESTONE";

/// Apply environment variable overrides to a config.
///
/// This allows sensitive values like the bot token to be provided via
/// environment variables instead of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }
    if let Ok(channel_id) = env::var(format!("{}_CHANNEL_ID", ENV_PREFIX)) {
        config.discord.channel_id = channel_id;
    }
    if let Ok(listen) = env::var(format!("{}_GAME_LISTEN", ENV_PREFIX)) {
        config.game.listen = listen;
    }
    config
}

/// Get the config file path from environment or use default.
///
/// Checks `LODESTONE_CONFIG`, otherwise returns "lodestone.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "lodestone.conf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DiscordConfig, GameConfig, MessageConfig};

    fn make_test_config() -> Config {
        Config {
            discord: DiscordConfig {
                token: "original_token".to_string(),
                channel_id: "1".to_string(),
                default_role: "member".to_string(),
                status_messages: false,
                player_join_messages: false,
                player_death_messages: false,
                status_list: Vec::new(),
            },
            message: MessageConfig::default(),
            game: GameConfig::default(),
        }
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "LODESTONE");
    }

    #[test]
    fn test_get_config_path_default() {
        env::remove_var("LODESTONE_CONFIG");
        assert_eq!(get_config_path(), "lodestone.conf");
    }

    #[test]
    fn test_apply_env_overrides_no_vars() {
        env::remove_var("LODESTONE_DISCORD_TOKEN");
        env::remove_var("LODESTONE_CHANNEL_ID");
        env::remove_var("LODESTONE_GAME_LISTEN");

        let result = apply_env_overrides(make_test_config());

        assert_eq!(result.discord.token, "original_token");
        assert_eq!(result.discord.channel_id, "1");
    }
}
