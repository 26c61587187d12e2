//! Discord event processing.
//!
//! Classifies raw bot events into relay traffic: relay-channel messages and
//! DMs go to the router, slash commands get ephemeral responses, and Ready
//! registers the command set and starts the presence cycler.

use std::sync::Arc;

use serenity::all::{
    ChannelId, Command, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
    Message, Ready,
};
use serenity::prelude::Context;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::bridge::router::{DiscordEvent, Router};
use crate::common::types::RemoteUser;
use crate::discord::commands;
use crate::discord::status;

pub struct RelayHandler {
    router: Arc<Router>,
    relay_channel: ChannelId,
    status_messages: bool,
    status_list: Vec<String>,
    shutdown_rx: watch::Receiver<bool>,
    status_task: Option<JoinHandle<()>>,
}

impl RelayHandler {
    pub fn new(
        router: Arc<Router>,
        relay_channel: ChannelId,
        status_messages: bool,
        status_list: Vec<String>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            router,
            relay_channel,
            status_messages,
            status_list,
            shutdown_rx,
            status_task: None,
        }
    }

    pub async fn handle_ready(&mut self, context: Context, ready: Ready) {
        info!("Discord bot connected as {}", ready.user.name);

        if let Err(e) = Command::set_global_commands(&context.http, commands::relay_commands()).await
        {
            error!("Failed to register slash commands: {}", e);
        }

        if self.status_messages {
            let notice = "**Server Status** The server is online.";
            if let Err(e) = self.relay_channel.say(&context.http, notice).await {
                warn!("Failed to send online notice: {}", e);
            }
        }

        // Ready also fires on reconnect; restart the cycler instead of
        // stacking another one.
        if let Some(task) = self.status_task.take() {
            task.abort();
        }
        self.status_task = Some(tokio::spawn(status::cycle_status(
            context,
            self.status_list.clone(),
            self.shutdown_rx.clone(),
        )));
    }

    pub fn handle_disconnected(&mut self) {
        if let Some(task) = self.status_task.take() {
            task.abort();
        }
    }

    pub async fn handle_message(&self, context: Context, message: Message) {
        let author = RemoteUser::new(message.author.id.get(), message.author.name.clone());
        let author_is_bot = message.author.bot;

        let event = if message.guild_id.is_none() {
            DiscordEvent::DirectMessage {
                author,
                author_is_bot,
                content: message.content,
            }
        } else if message.channel_id == self.relay_channel {
            let role = resolve_role(&context, &message);
            let display_name = message
                .member
                .as_deref()
                .and_then(|member| member.nick.clone())
                .or_else(|| message.author.global_name.clone())
                .unwrap_or_else(|| message.author.name.clone());

            DiscordEvent::ChannelMessage {
                author,
                author_is_bot,
                display_name,
                role,
                content: message.content,
            }
        } else {
            return;
        };

        self.router.handle_discord_event(event).await;
    }

    pub async fn handle_interaction(&self, context: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let response_text = match command.data.name.as_str() {
            commands::LIST_COMMAND => self.router.list_response(),
            commands::MSG_COMMAND => {
                let options = command.data.options();
                match commands::parse_msg_arguments(&options) {
                    Some(args) => {
                        let invoker =
                            RemoteUser::new(command.user.id.get(), command.user.name.clone());
                        self.router
                            .slash_msg(&invoker, args.player, args.message)
                            .await
                    }
                    None => "Both a player and a message are required.".to_string(),
                }
            }
            // Not one of ours.
            _ => return,
        };

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(response_text)
                .ephemeral(true),
        );
        if let Err(e) = command.create_response(&context.http, response).await {
            warn!("Failed to respond to /{}: {}", command.data.name, e);
        }
    }
}

/// Highest role carried by the message author, resolved through the guild
/// cache. None when the member has no roles or the guild is not cached yet.
fn resolve_role(context: &Context, message: &Message) -> Option<String> {
    let guild_id = message.guild_id?;
    let member = message.member.as_deref()?;
    let guild = guild_id.to_guild_cached(&context.cache)?;
    member
        .roles
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .max_by_key(|role| role.position)
        .map(|role| role.name.clone())
}
