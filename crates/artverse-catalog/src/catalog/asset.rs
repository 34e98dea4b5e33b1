//! Canonical asset representation.

use crate::ids::AssetId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of attributes shown on a result card.
pub const PREVIEW_ATTRIBUTES: usize = 3;

/// A single trait of an asset (e.g., Background: Blue).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Trait name.
    pub trait_type: String,
    /// Trait value, always as text.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// The fully resolved record used by filtering and display.
///
/// Built fresh on every fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAsset {
    /// `"<contract_address>:<token_id>"`.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Resolved image location. Never empty.
    pub image_url: String,
    /// Description text, possibly empty.
    pub description: String,
    /// Traits in source order.
    pub attributes: Vec<Attribute>,
    /// Collection name, possibly empty.
    pub collection: String,
    /// Chain name as sent by the backend, possibly empty.
    pub chain: String,
    /// Mint date as sent by the backend. Not validated.
    pub mint_date: String,
}

impl NormalizedAsset {
    /// Attributes shown on a card.
    pub fn preview_attributes(&self) -> &[Attribute] {
        let end = self.attributes.len().min(PREVIEW_ATTRIBUTES);
        &self.attributes[..end]
    }

    /// Mint date as `YYYY-MM-DD` when it can be read as a date.
    ///
    /// Unreadable dates are returned verbatim; an empty date yields `None`.
    pub fn mint_date_display(&self) -> Option<String> {
        let raw = self.mint_date.trim();
        if raw.is_empty() {
            return None;
        }

        let parsed = DateTime::parse_from_rfc3339(raw)
            .map(|d| d.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|d| d.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

        Some(match parsed {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        })
    }

    /// Lowercased text the free-term search runs against.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4 + self.attributes.len());
        parts.push(self.name.clone());
        parts.push(self.collection.clone());
        parts.push(self.description.clone());
        parts.push(self.chain.clone());
        parts.extend(
            self.attributes
                .iter()
                .map(|attr| format!("{} {}", attr.trait_type, attr.value)),
        );
        parts.join(" ").to_lowercase()
    }
}
