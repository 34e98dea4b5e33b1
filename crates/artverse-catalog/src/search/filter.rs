//! Predicate evaluation of a parsed query against one asset.

use crate::catalog::NormalizedAsset;
use crate::search::ParsedQuery;
use serde::{Deserialize, Serialize};

/// File-type classes understood by the `type:` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClass {
    Image,
    Video,
}

impl FileClass {
    /// Look up a class by its filter value. Unknown names have no class.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(FileClass::Image),
            "video" => Some(FileClass::Video),
            _ => None,
        }
    }

    /// The filter value naming this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileClass::Image => "image",
            FileClass::Video => "video",
        }
    }

    /// Keywords that mark an asset as belonging to this class.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            FileClass::Image => &["image", "img", "jpeg", "jpg", "png", "gif", "webp"],
            FileClass::Video => &["video", "mp4", "avi", "mov", "webm"],
        }
    }

    /// Whether any keyword occurs in the image URL or the name.
    pub fn matches(&self, asset: &NormalizedAsset) -> bool {
        let url = asset.image_url.to_lowercase();
        let name = asset.name.to_lowercase();
        self.keywords()
            .iter()
            .any(|kw| url.contains(kw) || name.contains(kw))
    }
}

impl ParsedQuery {
    /// Decide whether `asset` satisfies every clause of the query.
    ///
    /// An empty query matches everything. An empty `blockchain` value matches
    /// nothing; an empty token id or an unknown `type:` value filters nothing out.
    pub fn matches(&self, asset: &NormalizedAsset) -> bool {
        if let Some(chain) = &self.filters.blockchain {
            if chain.is_empty() || asset.chain.to_lowercase() != *chain {
                return false;
            }
        }

        if let Some(file_type) = &self.filters.file_type {
            if let Some(class) = FileClass::from_name(file_type) {
                if !class.matches(asset) {
                    return false;
                }
            }
        }

        if let Some(token_id) = &self.filters.token_id {
            let tagged = format!("#{}", token_id);
            if !asset.id.contains(token_id) && !asset.name.to_lowercase().contains(&tagged) {
                return false;
            }
        }

        if !self.terms.is_empty() {
            let haystack = asset.search_text();
            if !self.terms.iter().all(|term| haystack.contains(term.as_str())) {
                return false;
            }
        }

        true
    }

    /// Keep the assets that match, in order.
    pub fn filter<'a, I>(&self, assets: I) -> Vec<NormalizedAsset>
    where
        I: IntoIterator<Item = &'a NormalizedAsset>,
    {
        assets
            .into_iter()
            .filter(|asset| self.matches(asset))
            .cloned()
            .collect()
    }
}

/// Free-function form of [`ParsedQuery::matches`].
pub fn matches(asset: &NormalizedAsset, query: &ParsedQuery) -> bool {
    query.matches(asset)
}
