//! Production delivery gateway.
//!
//! Discord-bound sends go through the serenity HTTP client; game-bound sends
//! are handed to the game-link writer task via the command channel.

use std::sync::Arc;

use serenity::all::{ChannelId, CreateEmbed, CreateMessage, UserId};
use serenity::async_trait;
use serenity::http::Http;
use tokio::sync::mpsc;

use crate::bridge::gateway::{DeliveryGateway, DirectPayload};
use crate::common::error::{DeliveryError, DeliveryResult};
use crate::common::types::PlayerId;
use crate::game::protocol::GameCommand;

pub struct BridgeGateway {
    http: Arc<Http>,
    relay_channel: ChannelId,
    game_tx: mpsc::UnboundedSender<GameCommand>,
}

impl BridgeGateway {
    pub fn new(
        http: Arc<Http>,
        relay_channel: ChannelId,
        game_tx: mpsc::UnboundedSender<GameCommand>,
    ) -> Self {
        Self {
            http,
            relay_channel,
            game_tx,
        }
    }
}

#[async_trait]
impl DeliveryGateway for BridgeGateway {
    async fn send_to_channel(&self, text: &str) -> DeliveryResult {
        self.relay_channel
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::ChannelSend {
                channel_id: self.relay_channel.get(),
                source: e,
            })
    }

    async fn send_direct(&self, user_id: u64, payload: DirectPayload) -> DeliveryResult {
        let rejected = |source| DeliveryError::DirectMessageRejected { user_id, source };

        let dm = UserId::new(user_id)
            .create_dm_channel(&self.http)
            .await
            .map_err(rejected)?;

        let message = match payload {
            DirectPayload::Text(text) => CreateMessage::new().content(text),
            DirectPayload::Embed { title, description } => {
                CreateMessage::new().embed(CreateEmbed::new().title(title).description(description))
            }
        };

        dm.id
            .send_message(&self.http, message)
            .await
            .map(|_| ())
            .map_err(rejected)
    }

    async fn send_to_player(&self, player: PlayerId, text: &str) -> DeliveryResult {
        self.game_tx
            .send(GameCommand::Tell {
                player,
                message: text.to_string(),
            })
            .map_err(|_| DeliveryError::GameLinkClosed)
    }

    async fn broadcast_in_game(&self, text: &str) -> DeliveryResult {
        self.game_tx
            .send(GameCommand::Broadcast {
                message: text.to_string(),
            })
            .map_err(|_| DeliveryError::GameLinkClosed)
    }
}
