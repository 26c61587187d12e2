//! Common utilities and types shared across the application.

pub mod error;
pub mod types;

pub use error::{DeliveryError, DeliveryResult};
pub use types::{PlayerId, PrivateMessage, RemoteUser, ReplyBinding};
