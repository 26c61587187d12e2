//! Configuration validation.
//!
//! Run once at startup; any failure here is fatal and the bridge refuses to
//! activate.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Discord credentials
    if config.discord.token.trim().is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "BOT_TOKEN" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }

    // Relay channel
    if config.discord.channel_id.trim().is_empty() {
        errors.push("discord.channel-id is required".to_string());
    } else if config.discord.channel_id == "CHANNEL_ID" {
        errors.push(
            "discord.channel-id has not been configured (still using placeholder)".to_string(),
        );
    } else if config.relay_channel_id().is_none() {
        errors.push(format!(
            "discord.channel-id '{}' is not a valid channel snowflake",
            config.discord.channel_id
        ));
    }

    // Game link
    if config.game.listen.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "game.listen '{}' is not a valid socket address",
            config.game.listen
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DiscordConfig, GameConfig, MessageConfig};

    fn make_valid_config() -> Config {
        Config {
            discord: DiscordConfig {
                token: "valid_token_here".to_string(),
                channel_id: "123456789".to_string(),
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
    fn test_valid_config_passes() {
        assert!(validate_config(&make_valid_config()).is_ok());
    }

    #[test]
    fn test_empty_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = String::new();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("discord.token"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = "BOT_TOKEN".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("placeholder"));
    }

    #[test]
    fn test_placeholder_channel_fails() {
        let mut config = make_valid_config();
        config.discord.channel_id = "CHANNEL_ID".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("channel-id"));
    }

    #[test]
    fn test_non_numeric_channel_fails() {
        let mut config = make_valid_config();
        config.discord.channel_id = "general".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("snowflake"));
    }

    #[test]
    fn test_zero_channel_fails() {
        let mut config = make_valid_config();
        config.discord.channel_id = "0".to_string();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_listen_address_fails() {
        let mut config = make_valid_config();
        config.game.listen = "not-an-address".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("game.listen"));
    }
}
