//! Message formatting for the relay.
//!
//! Handles placeholder substitution in the configurable message templates.
//! Discord-to-game templates support `$display_name`, `$handle`, `$role` and
//! `$message`; game-to-Discord templates support `$user_name` and `$message`.
//! Substitution is literal find-and-replace; tokens are not nested.

/// Default format for Discord -> game messages.
pub const DEFAULT_DISCORD_TO_GAME_FORMAT: &str = "[Discord] $display_name ($role): $message";

/// Default format for game -> Discord messages.
pub const DEFAULT_GAME_TO_DISCORD_FORMAT: &str = "**$user_name**: $message";

/// Template pair for the two relay directions.
#[derive(Debug, Clone)]
pub struct MessageTemplates {
    discord_to_game: String,
    game_to_discord: String,
}

impl MessageTemplates {
    pub fn new(discord_to_game: impl Into<String>, game_to_discord: impl Into<String>) -> Self {
        Self {
            discord_to_game: discord_to_game.into(),
            game_to_discord: game_to_discord.into(),
        }
    }

    /// Render a Discord channel message for the in-game broadcast.
    ///
    /// `$message` is substituted last so tokens inside the body are inert.
    pub fn render_discord_to_game(
        &self,
        display_name: &str,
        handle: &str,
        role: &str,
        message: &str,
    ) -> String {
        self.discord_to_game
            .replace("$display_name", display_name)
            .replace("$handle", handle)
            .replace("$role", role)
            .replace("$message", message)
    }

    /// Render a game chat line for the relay channel.
    pub fn render_game_to_discord(&self, user_name: &str, message: &str) -> String {
        self.game_to_discord
            .replace("$user_name", user_name)
            .replace("$message", message)
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_DISCORD_TO_GAME_FORMAT, DEFAULT_GAME_TO_DISCORD_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discord_to_game_substitution() {
        let templates = MessageTemplates::new("<$display_name/$handle/$role> $message", "");
        assert_eq!(
            templates.render_discord_to_game("Display", "handle", "admin", "hi"),
            "<Display/handle/admin> hi"
        );
    }

    #[test]
    fn test_game_to_discord_substitution() {
        let templates = MessageTemplates::new("", "**$user_name**: $message");
        assert_eq!(
            templates.render_game_to_discord("Steve", "hello"),
            "**Steve**: hello"
        );
    }

    #[test]
    fn test_tokens_in_body_are_inert() {
        let templates = MessageTemplates::new("$display_name: $message", "");
        assert_eq!(
            templates.render_discord_to_game("A", "a", "member", "$role wins"),
            "A: $role wins"
        );
    }

    #[test]
    fn test_defaults() {
        let templates = MessageTemplates::default();
        assert_eq!(
            templates.render_game_to_discord("Steve", "hi"),
            "**Steve**: hi"
        );
        assert_eq!(
            templates.render_discord_to_game("D", "d", "member", "hi"),
            "[Discord] D (member): hi"
        );
    }
}
