//! Routing core: reply directory, escaping, formatting, and the router.
//!
//! Everything here is platform-agnostic; Discord and game specifics stay
//! behind the `DeliveryGateway` trait and the event enums.

pub mod directory;
pub mod escape;
pub mod formatter;
pub mod gateway;
pub mod router;

pub use directory::ReplyDirectory;
pub use escape::{escape_display_name, ChatSanitizer};
pub use formatter::MessageTemplates;
pub use gateway::{DeliveryGateway, DirectPayload};
pub use router::{DiscordEvent, RelayOptions, Router};
