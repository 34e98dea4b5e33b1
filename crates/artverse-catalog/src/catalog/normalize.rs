//! Mapping raw backend records onto [`NormalizedAsset`].

use crate::catalog::record::value_text;
use crate::catalog::{Attribute, CatalogRecord, NormalizedAsset};
use crate::ids::AssetId;
use serde::Serialize;
use serde_json::Value;

/// Image used when a record carries no image field at all.
pub const DEFAULT_FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?w=400&h=400&fit=crop";

/// Name used when neither the record nor its metadata has one.
pub const UNNAMED_ASSET: &str = "Unnamed NFT";

/// Where a resolved image URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// `cached_image_url` on the record.
    Cached,
    /// `raw_metadata.image`.
    MetadataImage,
    /// `raw_metadata.image_url`.
    MetadataImageUrl,
    /// The configured fallback.
    Fallback,
}

impl ImageSource {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Cached => "cached",
            ImageSource::MetadataImage => "metadata_image",
            ImageSource::MetadataImageUrl => "metadata_image_url",
            ImageSource::Fallback => "fallback",
        }
    }
}

/// Total mapping from [`CatalogRecord`] to [`NormalizedAsset`].
///
/// Every field has a fallback, so normalization never fails. The precedence
/// chains for the image, name and description are fixed:
///
/// - image: `cached_image_url` → `raw_metadata.image` → `raw_metadata.image_url` → fallback
/// - name: `name` → `raw_metadata.name` → placeholder
/// - description: `description` → `raw_metadata.description` → empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    fallback_image_url: String,
    unnamed_label: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with the stock fallback image and placeholder name.
    pub fn new() -> Self {
        Self {
            fallback_image_url: DEFAULT_FALLBACK_IMAGE_URL.to_string(),
            unnamed_label: UNNAMED_ASSET.to_string(),
        }
    }

    /// Use a different fallback image. An empty URL keeps the current one.
    pub fn with_fallback_image_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.fallback_image_url = url;
        }
        self
    }

    /// Use a different placeholder name. An empty label keeps the current one.
    pub fn with_unnamed_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.is_empty() {
            self.unnamed_label = label;
        }
        self
    }

    /// The configured fallback image.
    pub fn fallback_image_url(&self) -> &str {
        &self.fallback_image_url
    }

    /// Resolve the image URL and report which field supplied it.
    pub fn resolve_image(&self, record: &CatalogRecord) -> (String, ImageSource) {
        if let Some(url) = record.text("cached_image_url") {
            return (url, ImageSource::Cached);
        }
        if let Some(url) = record.metadata_text("image") {
            return (url, ImageSource::MetadataImage);
        }
        if let Some(url) = record.metadata_text("image_url") {
            return (url, ImageSource::MetadataImageUrl);
        }
        (self.fallback_image_url.clone(), ImageSource::Fallback)
    }

    /// Normalize one record.
    pub fn normalize(&self, record: &CatalogRecord) -> NormalizedAsset {
        let contract = record.text("contract_address").unwrap_or_default();
        let token = record.text("token_id").unwrap_or_default();
        let id = AssetId::from_parts(&contract, &token);

        let (image_url, source) = self.resolve_image(record);
        tracing::trace!(asset = %id, image_source = source.as_str(), %image_url, "resolved image");

        NormalizedAsset {
            name: record
                .text("name")
                .or_else(|| record.metadata_text("name"))
                .unwrap_or_else(|| self.unnamed_label.clone()),
            image_url,
            description: record
                .text("description")
                .or_else(|| record.metadata_text("description"))
                .unwrap_or_default(),
            attributes: normalize_attributes(record.attributes()),
            collection: record.collection_name().unwrap_or_default(),
            chain: record.text("chain").unwrap_or_default(),
            mint_date: record.metadata_text("minted_date").unwrap_or_default(),
            id,
        }
    }

    /// Normalize a whole payload, keeping order.
    pub fn normalize_all(&self, records: &[CatalogRecord]) -> Vec<NormalizedAsset> {
        records.iter().map(|r| self.normalize(r)).collect()
    }
}

/// Flatten either attribute shape into ordered pairs.
fn normalize_attributes(raw: Option<&Value>) -> Vec<Attribute> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| {
                let field = |key: &str| item.get(key).map(value_text).unwrap_or_default();
                Attribute::new(field("trait_type"), field("value"))
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(trait_type, value)| Attribute::new(trait_type.clone(), value_text(value)))
            .collect(),
        _ => Vec::new(),
    }
}
