//! Delivery gateway contract.
//!
//! The router talks to the outside world only through this trait. The
//! production implementation lives in `discord::gateway` and wraps the
//! serenity HTTP client plus the game-link command channel; tests swap in a
//! recording stub.

use serenity::async_trait;

use crate::common::error::DeliveryResult;
use crate::common::types::PlayerId;

/// Payload for a direct message to a Discord user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectPayload {
    /// Plain text message.
    Text(String),
    /// Rich embed with a title and description.
    Embed { title: String, description: String },
}

/// Outbound delivery operations, all fire-and-forget from the caller's
/// perspective except where the router chains a completion (reply notices).
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Send text to the designated relay channel on Discord.
    async fn send_to_channel(&self, text: &str) -> DeliveryResult;

    /// Send a direct message to a Discord user.
    async fn send_direct(&self, user_id: u64, payload: DirectPayload) -> DeliveryResult;

    /// Send text to a single online player in game.
    ///
    /// Player-visible state is only ever mutated by the game platform's own
    /// scheduler; this call hands the text to the single game-link writer
    /// task, which is the one constrained path into it.
    async fn send_to_player(&self, player: PlayerId, text: &str) -> DeliveryResult;

    /// Broadcast text to the in-game public chat.
    async fn broadcast_in_game(&self, text: &str) -> DeliveryResult;
}
