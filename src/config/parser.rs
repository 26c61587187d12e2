//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config = load_config_str(
            r#"
            discord {
              token = "abc123"
              channel-id = "123456789"
              default-role = "guest"
              status-messages = true
              player-join-messages = true
              status-list = ["mining", "crafting"]
            }
            message {
              discord = "<$display_name> $message"
              minecraft = "$user_name: $message"
            }
            game {
              listen = "0.0.0.0:4000"
            }
            "#,
        )
        .expect("config parses");

        assert_eq!(config.discord.token, "abc123");
        assert_eq!(config.discord.channel_id, "123456789");
        assert_eq!(config.discord.default_role, "guest");
        assert!(config.discord.status_messages);
        assert!(config.discord.player_join_messages);
        assert!(!config.discord.player_death_messages);
        assert_eq!(config.discord.status_list, vec!["mining", "crafting"]);
        assert_eq!(config.message.discord, "<$display_name> $message");
        assert_eq!(config.game.listen, "0.0.0.0:4000");
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = load_config_str(
            r#"
            discord {
              token = "abc123"
              channel-id = "123456789"
            }
            "#,
        )
        .expect("config parses");

        assert_eq!(config.discord.default_role, "member");
        assert!(!config.discord.status_messages);
        assert!(config.discord.status_list.is_empty());
        assert_eq!(config.game.listen, "127.0.0.1:25585");
        assert_eq!(config.relay_channel_id(), Some(123456789));
    }
}
