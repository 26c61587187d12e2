//! Message routing between Discord and the game server.
//!
//! The router classifies every inbound event, resolves reply targets through
//! the `ReplyDirectory`, formats outbound text, and hands delivery to the
//! gateway. It is the only component that mutates routing state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bridge::directory::ReplyDirectory;
use crate::bridge::escape::{escape_display_name, ChatSanitizer};
use crate::bridge::formatter::MessageTemplates;
use crate::bridge::gateway::{DeliveryGateway, DirectPayload};
use crate::common::types::{PlayerId, PrivateMessage, RemoteUser};
use crate::game::protocol::{GameEvent, PlayerRef, QuitReason};
use crate::game::roster::Roster;

/// Relay behavior toggles, taken from configuration.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    /// Role label used when a Discord member has no role.
    pub default_role: String,
    /// Relay join notices (and quit notices, which share this toggle).
    pub player_join_messages: bool,
    /// Relay death notices.
    pub player_death_messages: bool,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            default_role: "member".to_string(),
            player_join_messages: false,
            player_death_messages: false,
        }
    }
}

/// Inbound Discord events, as classified by the Discord shim.
#[derive(Debug, Clone)]
pub enum DiscordEvent {
    /// Message on the designated relay channel.
    ChannelMessage {
        author: RemoteUser,
        author_is_bot: bool,
        /// Server nickname or global display name, unlike the account handle.
        display_name: String,
        /// Primary role label, if the member has one.
        role: Option<String>,
        content: String,
    },
    /// Private message to the bot.
    DirectMessage {
        author: RemoteUser,
        author_is_bot: bool,
        content: String,
    },
}

/// Central message router.
pub struct Router {
    options: RelayOptions,
    templates: MessageTemplates,
    sanitizer: ChatSanitizer,
    directory: ReplyDirectory,
    roster: Roster,
    gateway: Arc<dyn DeliveryGateway>,
}

impl Router {
    pub fn new(
        options: RelayOptions,
        templates: MessageTemplates,
        sanitizer: ChatSanitizer,
        directory: ReplyDirectory,
        roster: Roster,
        gateway: Arc<dyn DeliveryGateway>,
    ) -> Self {
        Self {
            options,
            templates,
            sanitizer,
            directory,
            roster,
            gateway,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn directory(&self) -> &ReplyDirectory {
        &self.directory
    }

    // ------------------------------------------------------------------
    // Discord -> game
    // ------------------------------------------------------------------

    /// Route an inbound Discord event.
    pub async fn handle_discord_event(&self, event: DiscordEvent) {
        match event {
            DiscordEvent::ChannelMessage {
                author,
                author_is_bot,
                display_name,
                role,
                content,
            } => {
                self.handle_channel_message(
                    &author,
                    author_is_bot,
                    &display_name,
                    role.as_deref(),
                    &content,
                )
                .await;
            }
            DiscordEvent::DirectMessage {
                author,
                author_is_bot,
                content,
            } => {
                self.handle_direct_message(&author, author_is_bot, &content)
                    .await;
            }
        }
    }

    /// Relay-channel message -> in-game broadcast.
    ///
    /// Messages from bot accounts are dropped unconditionally so the relay
    /// never echoes its own (or any other bot's) traffic back into the game.
    async fn handle_channel_message(
        &self,
        author: &RemoteUser,
        author_is_bot: bool,
        display_name: &str,
        role: Option<&str>,
        content: &str,
    ) {
        if author_is_bot {
            debug!("Dropping relay-channel message from bot {}", author.handle);
            return;
        }

        let role = role.unwrap_or(&self.options.default_role);
        let formatted =
            self.templates
                .render_discord_to_game(display_name, &author.handle, role, content);

        info!("Discord -> game [{}]: {}", author.handle, content);
        if let Err(e) = self.gateway.broadcast_in_game(&formatted).await {
            warn!("Failed to broadcast Discord message in game: {}", e);
        }
    }

    /// Direct message to the bot -> the player expecting a reply, if any.
    ///
    /// Without a live binding to an online player the message is dropped
    /// silently; the sender gets no error back.
    async fn handle_direct_message(&self, author: &RemoteUser, author_is_bot: bool, content: &str) {
        if author_is_bot {
            return;
        }

        let Some((player, _binding)) = self.directory.lookup_by_remote_user(author.id) else {
            debug!("DM from {} with no reply binding; dropped", author.handle);
            return;
        };

        if !self.roster.is_online(player) {
            debug!(
                "DM from {} targets offline player {}; dropped",
                author.handle, player
            );
            return;
        }

        let text = format!("({} -> you) {}", author.handle, content);
        if let Err(e) = self.gateway.send_to_player(player, &text).await {
            warn!("Failed to deliver DM from {} in game: {}", author.handle, e);
        }
    }

    // ------------------------------------------------------------------
    // Slash commands (ephemeral responses returned to the invoker)
    // ------------------------------------------------------------------

    /// `/list`: snapshot of online player names.
    pub fn list_response(&self) -> String {
        let names = self.roster.names();
        if names.is_empty() {
            "Online Players: No players are currently online.".to_string()
        } else {
            let names: Vec<String> = names.iter().map(|n| escape_display_name(n)).collect();
            format!("Online Players: {}", names.join(", "))
        }
    }

    /// `/msg <player> <message>`: one-way message to a player, creating or
    /// overwriting the reply binding for that player.
    pub async fn slash_msg(&self, invoker: &RemoteUser, player_name: &str, body: &str) -> String {
        let Some((player, name)) = self.roster.find_by_name(player_name) else {
            return format!(
                "Player '{}' is not online or does not exist.",
                player_name
            );
        };

        self.directory.bind(player, invoker);

        let text = format!("({} -> you) {}", invoker.handle, body);
        if let Err(e) = self.gateway.send_to_player(player, &text).await {
            warn!("Failed to deliver /msg to {}: {}", name, e);
            return format!(
                "Failed to deliver the message to {}.",
                escape_display_name(&name)
            );
        }

        info!("/msg {} from {}: {}", name, invoker.handle, body);
        format!("Message sent to {}!", escape_display_name(&name))
    }

    // ------------------------------------------------------------------
    // Game -> Discord
    // ------------------------------------------------------------------

    /// Route an inbound game event. Join/quit roster upkeep happens here so
    /// every consumer sees one consistent ordering of notice and snapshot.
    pub async fn handle_game_event(&self, event: GameEvent) {
        match event {
            GameEvent::Chat { player, message } => self.handle_game_chat(&player, &message).await,
            GameEvent::Join { player } => {
                self.roster.insert(player.id, player.name.clone());
                self.handle_player_join(&player).await;
            }
            GameEvent::Quit { player, reason } => {
                self.roster.remove(player.id);
                self.handle_player_quit(&player, reason).await;
            }
            GameEvent::Death {
                player,
                death_message,
            } => self.handle_player_death(&player, &death_message).await,
            GameEvent::Command { player, input } => {
                match crate::game::commands::parse(&input) {
                    Some(crate::game::commands::InGameCommand::Reply { message }) => {
                        self.handle_reply(&player, &message).await;
                    }
                    // Unrecognized commands are not ours to answer.
                    None => {}
                }
            }
        }
    }

    async fn handle_game_chat(&self, player: &PlayerRef, message: &str) {
        let cleaned = self.sanitizer.sanitize(message);
        let formatted = self
            .templates
            .render_game_to_discord(&escape_display_name(&player.name), &cleaned);

        if let Err(e) = self.gateway.send_to_channel(&formatted).await {
            warn!("Failed to relay chat from {}: {}", player.name, e);
        }
    }

    async fn handle_player_join(&self, player: &PlayerRef) {
        if !self.options.player_join_messages {
            return;
        }
        let notice = format!(
            "**{}** has joined the server!",
            escape_display_name(&player.name)
        );
        if let Err(e) = self.gateway.send_to_channel(&notice).await {
            warn!("Failed to relay join notice for {}: {}", player.name, e);
        }
    }

    async fn handle_player_quit(&self, player: &PlayerRef, reason: QuitReason) {
        // Quit notices share the join toggle; there is no separate setting.
        if !self.options.player_join_messages {
            return;
        }
        let notice = format!(
            "**{}** {}",
            escape_display_name(&player.name),
            reason.phrase()
        );
        if let Err(e) = self.gateway.send_to_channel(&notice).await {
            warn!("Failed to relay quit notice for {}: {}", player.name, e);
        }
    }

    async fn handle_player_death(&self, player: &PlayerRef, death_message: &str) {
        if !self.options.player_death_messages {
            return;
        }
        // The platform sentence embeds "{name} " somewhere; drop its first
        // occurrence and keep the rest verbatim.
        let cause = if death_message.is_empty() {
            "died.".to_string()
        } else {
            death_message.replacen(&format!("{} ", player.name), "", 1)
        };
        let notice = format!("**{}** {}", escape_display_name(&player.name), cause);
        if let Err(e) = self.gateway.send_to_channel(&notice).await {
            warn!("Failed to relay death notice for {}: {}", player.name, e);
        }
    }

    /// `reply <message>` from a player.
    ///
    /// The binding is retained on both outcomes: on success so the
    /// conversation can continue, on failure so the player can retry once
    /// the Discord user fixes their DM settings.
    async fn handle_reply(&self, player: &PlayerRef, message: &str) {
        let Some(binding) = self.directory.lookup_by_player(player.id) else {
            self.notify_player(player.id, "You have no one to reply to.")
                .await;
            return;
        };

        let private = PrivateMessage {
            sender: player.id,
            sender_name: player.name.clone(),
            recipient: binding.user_id,
            body: message.to_string(),
        };
        let payload = DirectPayload::Embed {
            title: "New Message".to_string(),
            description: format!(
                "Hello! Player {} (`{}`) has sent you a message: **{}**",
                escape_display_name(&private.sender_name),
                private.sender,
                private.body
            ),
        };

        match self.gateway.send_direct(private.recipient, payload).await {
            Ok(()) => {
                self.notify_player(
                    player.id,
                    &format!(
                        "Your message has been sent to {}. You can now reply to the bot to continue the conversation.",
                        binding.handle
                    ),
                )
                .await;
            }
            Err(e) => {
                warn!(
                    "Failed to DM {} on behalf of {}: {}",
                    binding.handle, player.name, e
                );
                self.notify_player(
                    player.id,
                    &format!(
                        "Failed to send message to {} - the Discord user may have DMs disabled. You cannot reply to this user until they resolve this issue.",
                        binding.handle
                    ),
                )
                .await;
            }
        }
    }

    async fn notify_player(&self, player: PlayerId, text: &str) {
        if let Err(e) = self.gateway.send_to_player(player, text).await {
            warn!("Failed to notify player {}: {}", player, e);
        }
    }
}
