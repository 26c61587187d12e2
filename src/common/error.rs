//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
///
/// These are fatal: the relay refuses to activate on any of them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Delivery failures reported by the gateway.
///
/// All of these are non-fatal and localized: they are logged, surfaced to
/// the originating player where one exists, and never tear down a binding.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to send to relay channel {channel_id}: {source}")]
    ChannelSend {
        channel_id: u64,
        #[source]
        source: serenity::Error,
    },

    #[error("Direct message to user {user_id} rejected: {source}")]
    DirectMessageRejected {
        user_id: u64,
        #[source]
        source: serenity::Error,
    },

    #[error("Game link closed; in-game delivery dropped")]
    GameLinkClosed,
}

/// Game link errors (companion plugin connection).
#[derive(Debug, Error)]
pub enum GameLinkError {
    #[error("Failed to bind game listener on {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for delivery operations.
pub type DeliveryResult = std::result::Result<(), DeliveryError>;
