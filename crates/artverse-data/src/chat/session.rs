//! The chat transcript.

use super::webhook::{ChatTransport, DEFAULT_SESSION_ID};
use super::wire::{ChatRequest, MediaItem};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// First assistant message of every session.
pub const WELCOME_MESSAGE: &str = "Hi! I'm Sharon AI, your NFT assistant. I have access to your database and can help you find information about NFTs currently available. What would you like to know?";

/// Assistant text when a reply carries neither `message` nor `text`.
pub const PLACEHOLDER_REPLY: &str = "I received your message but couldn't process it properly.";

/// Assistant text when a send fails.
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error processing your request. Please try again.";

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Lowercase role name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Position in the transcript, starting at 1.
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
}

/// A conversation with the webhook.
///
/// `send` takes `&mut self`, so one session never has two requests in flight.
pub struct ChatSession<T> {
    transport: T,
    session_id: String,
    transcript: Vec<ChatMessage>,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Start a session holding only the welcome message.
    pub fn new(transport: T) -> Self {
        let mut session = Self {
            transport,
            session_id: DEFAULT_SESSION_ID.to_string(),
            transcript: Vec::new(),
        };
        session.push(Role::Assistant, WELCOME_MESSAGE.to_string(), Vec::new());
        session
    }

    /// Send a different session id. An empty id keeps the current one.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        if !session_id.is_empty() {
            self.session_id = session_id;
        }
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one user message and record the assistant's answer.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the returned
    /// message is the assistant entry just appended: the reply text, the
    /// placeholder, or the apology when the send failed.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(Role::User, text.to_string(), Vec::new());

        let request = ChatRequest::new(text, self.session_id.as_str());
        let (content, media) = match self.transport.send(&request).await {
            Ok(reply) => {
                let content = reply.content().unwrap_or(PLACEHOLDER_REPLY).to_string();
                (content, reply.media_items())
            }
            Err(e) => {
                tracing::warn!(error = %e, session = %self.session_id, "chat send failed");
                (APOLOGY_MESSAGE.to_string(), Vec::new())
            }
        };
        self.push(Role::Assistant, content, media);
        self.transcript.last()
    }

    fn push(&mut self, role: Role, content: String, media: Vec<MediaItem>) {
        self.transcript.push(ChatMessage {
            id: self.transcript.len() as u64 + 1,
            role,
            content,
            timestamp: Utc::now(),
            media,
        });
    }
}
