//! Chat webhook subsystem.
//!
//! A [`ChatSession`] keeps the conversation transcript and forwards each user
//! message through a [`ChatTransport`]; [`WebhookClient`] is the HTTP one.

mod session;
mod webhook;
mod wire;

pub use session::{ChatMessage, ChatSession, Role, APOLOGY_MESSAGE, PLACEHOLDER_REPLY, WELCOME_MESSAGE};
pub use webhook::{ChatTransport, WebhookClient, DEFAULT_SESSION_ID};
pub use wire::{ChatReply, ChatRequest, MediaItem, MediaLink, IMAGE_ALT_DEFAULT, LINK_TITLE_DEFAULT};
