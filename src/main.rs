//! Lodestone - Discord-Minecraft chat relay
//!
//! A standalone daemon that bridges a Minecraft server's chat with a Discord
//! channel and routes private messages between Discord users and players,
//! with reply tracking in both directions.

mod bridge;
mod common;
mod config;
mod discord;
mod game;

use std::sync::Arc;

use anyhow::Result;
use serenity::all::ChannelId;
use tokio::signal;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use bridge::{ChatSanitizer, MessageTemplates, RelayOptions, ReplyDirectory, Router};
use config::{env::get_config_path, load_and_validate};
use discord::{build_client, BridgeGateway, DiscordBot, DiscordBotEvent, RelayHandler};
use game::{GameCommand, GameEvent, GameListener, Roster};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Lodestone v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!(
            "Please ensure {} exists and is properly formatted.",
            config_path
        );
        error!("See the example configuration for reference.");
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Relay channel: {}", config.discord.channel_id);
    info!("  Game link: {}", config.game.listen);

    let channel_id = config
        .relay_channel_id()
        .ok_or_else(|| anyhow::anyhow!("discord.channel-id is not a valid channel id"))?;
    let relay_channel = ChannelId::new(channel_id);

    // ============================================================
    // Create channels for communication
    // ============================================================

    // Game plugin -> router
    let (game_event_tx, mut game_event_rx) = mpsc::unbounded_channel::<GameEvent>();

    // Router/gateway -> game plugin
    let (game_command_tx, game_command_rx) = mpsc::unbounded_channel::<GameCommand>();

    // Serenity -> event processor
    let (discord_events_tx, discord_events_rx) = mpsc::unbounded_channel::<DiscordBotEvent>();

    // Shutdown broadcast
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ============================================================
    // Build the Discord client and the routing core
    // ============================================================

    let client = build_client(&config.discord.token, discord_events_tx.clone()).await?;
    let http = client.http.clone();

    let gateway = Arc::new(BridgeGateway::new(
        http.clone(),
        relay_channel,
        game_command_tx.clone(),
    ));

    let options = RelayOptions {
        default_role: config.discord.default_role.clone(),
        player_join_messages: config.discord.player_join_messages,
        player_death_messages: config.discord.player_death_messages,
    };
    let templates = MessageTemplates::new(&config.message.discord, &config.message.minecraft);
    let router = Arc::new(Router::new(
        options,
        templates,
        ChatSanitizer::new()?,
        ReplyDirectory::new(),
        Roster::new(),
        gateway,
    ));

    let handler = RelayHandler::new(
        router.clone(),
        relay_channel,
        config.discord.status_messages,
        config.discord.status_list.clone(),
        shutdown_rx.clone(),
    );

    let discord_bot = DiscordBot::new(
        client,
        config.discord.token.clone(),
        handler,
        discord_events_rx,
        discord_events_tx,
        shutdown_rx.clone(),
    );

    // ============================================================
    // Spawn tasks
    // ============================================================

    // Task 1: game link listener (companion plugin connection)
    let listener = GameListener::new(
        config.game.listen.clone(),
        game_event_tx,
        game_command_rx,
        shutdown_rx.clone(),
    );
    let game_task = tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            error!("Game link failed: {}", e);
        }
    });

    // Task 2: game event routing
    let router_task = {
        let router = router.clone();
        let mut shutdown_rx = shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = game_event_rx.recv() => {
                        match event {
                            Some(event) => router.handle_game_event(event).await,
                            None => break,
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Game event routing task ended");
        })
    };

    // Task 3: Discord bot
    info!("Starting Discord bot...");
    let mut discord_task = tokio::spawn(async move {
        discord_bot.run().await;
    });

    // ============================================================
    // Run until a task dies or a shutdown signal arrives
    // ============================================================
    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - initiating graceful shutdown...");
            true
        }
        _ = game_task => false,
        _ = router_task => false,
        _ = &mut discord_task => false,
    };

    if shutdown {
        if config.discord.status_messages {
            let notice = "**Server Status** The server is shutting down.";
            if let Err(e) = relay_channel.say(&http, notice).await {
                warn!("Failed to send shutdown notice: {}", e);
            }
        }

        if shutdown_tx.send(true).is_err() {
            info!("All tasks already exited");
        }

        let timeout = tokio::time::Duration::from_secs(5);
        match tokio::time::timeout(timeout, discord_task).await {
            Ok(Ok(())) => info!("Discord client shut down gracefully"),
            Ok(Err(e)) => warn!("Discord task panicked: {}", e),
            Err(_) => warn!("Discord shutdown timed out"),
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
