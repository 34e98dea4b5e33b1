//! Catalog module.
//!
//! Raw backend records, the canonical asset shape, and the normalizer that
//! maps one onto the other.

mod asset;
mod normalize;
mod record;

pub use asset::{Attribute, NormalizedAsset, PREVIEW_ATTRIBUTES};
pub use normalize::{ImageSource, Normalizer, DEFAULT_FALLBACK_IMAGE_URL, UNNAMED_ASSET};
pub use record::CatalogRecord;
