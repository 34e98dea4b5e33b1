//! NFT catalog domain types and search logic for Artverse.
//!
//! This crate turns loosely shaped backend records into uniform assets and
//! searches them:
//!
//! - **Catalog**: raw records, normalized assets, image and name fallbacks
//! - **Search**: query mini-language, predicate, paginated feed
//! - **Source**: the seam a catalog backend plugs into
//!
//! # Example
//!
//! ```rust,ignore
//! use artverse_catalog::prelude::*;
//!
//! let catalog = StaticCatalog::from_json_str(r#"[{"name": "Ape #42", "chain": "Ethereum"}]"#)?;
//! let feed = CatalogFeed::new(catalog);
//!
//! let page = feed.reset("blockchain:ethereum #42").await;
//! for asset in page.visible_assets() {
//!     println!("{} ({})", asset.name, asset.id);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod source;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::AssetId;
pub use source::{CatalogSource, StaticCatalog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::AssetId;
    pub use crate::source::{CatalogSource, StaticCatalog};

    // Catalog
    pub use crate::catalog::{Attribute, CatalogRecord, ImageSource, NormalizedAsset, Normalizer};

    // Search
    pub use crate::search::{CatalogFeed, FeedConfig, PageState, ParsedQuery};
}
