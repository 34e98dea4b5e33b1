//! Webhook request and reply bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Shown for an image without a title.
pub const IMAGE_ALT_DEFAULT: &str = "NFT Image";

/// Shown for a link without a title.
pub const LINK_TITLE_DEFAULT: &str = "View NFT";

/// Body of `POST <webhook>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub session_id: String,
}

impl ChatRequest {
    /// A request stamped with the current time.
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::at(message, session_id, Utc::now())
    }

    pub fn at(message: impl Into<String>, session_id: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            timestamp: time.to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id: session_id.into(),
        }
    }
}

/// Body the webhook answers with. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaItem>>,
}

impl ChatReply {
    /// First non-empty of `message` and `text`.
    pub fn content(&self) -> Option<&str> {
        [&self.message, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    /// Image and link items; unknown kinds are left out.
    pub fn media_items(&self) -> Vec<MediaItem> {
        self.media
            .iter()
            .flatten()
            .filter(|item| !matches!(item, MediaItem::Other))
            .cloned()
            .collect()
    }
}

/// One media attachment of a reply, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Image(MediaLink),
    Link(MediaLink),
    #[serde(other)]
    Other,
}

/// Payload shared by image and link attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MediaItem {
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaItem::Image(link) | MediaItem::Link(link) => Some(&link.url),
            MediaItem::Other => None,
        }
    }

    /// Title, or the per-kind default when there is none.
    pub fn display_title(&self) -> &str {
        match self {
            MediaItem::Image(link) => non_empty(&link.title).unwrap_or(IMAGE_ALT_DEFAULT),
            MediaItem::Link(link) => non_empty(&link.title).unwrap_or(LINK_TITLE_DEFAULT),
            MediaItem::Other => "",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            MediaItem::Link(link) => non_empty(&link.description),
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
