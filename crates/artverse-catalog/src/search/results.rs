//! Filtered results and the growing visible prefix.

use crate::catalog::NormalizedAsset;
use serde::Serialize;
use std::sync::Arc;

/// Assets handed out per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// The full filtered result set plus how much of it has been handed out.
///
/// `visible_count` only ever grows in steps of `page_size`, capped at the
/// length of the set, so it is a multiple of `page_size` except on the last
/// page. Cloning is cheap: the set is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    all_filtered: Arc<Vec<NormalizedAsset>>,
    visible_count: usize,
    page_size: usize,
}

impl PageState {
    /// Start a new result set with its first page visible.
    pub fn new(all_filtered: Vec<NormalizedAsset>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let visible_count = page_size.min(all_filtered.len());
        Self {
            all_filtered: Arc::new(all_filtered),
            visible_count,
            page_size,
        }
    }

    /// An exhausted, empty result set.
    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), page_size)
    }

    /// Reveal one more page. Returns `false` (and changes nothing) when the
    /// set is already exhausted.
    pub fn advance(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.visible_count = (self.visible_count + self.page_size).min(self.all_filtered.len());
        true
    }

    /// Replace the set with a freshly fetched one and reveal one page more
    /// than is visible now.
    pub fn advanced_over(&self, all_filtered: Vec<NormalizedAsset>) -> Self {
        let visible_count = (self.visible_count + self.page_size).min(all_filtered.len());
        Self {
            all_filtered: Arc::new(all_filtered),
            visible_count,
            page_size: self.page_size,
        }
    }

    /// The visible prefix.
    pub fn visible_assets(&self) -> &[NormalizedAsset] {
        &self.all_filtered[..self.visible_count]
    }

    /// The whole filtered set.
    pub fn all_filtered(&self) -> &[NormalizedAsset] {
        &self.all_filtered
    }

    /// Whether more pages remain.
    pub fn has_more(&self) -> bool {
        self.visible_count < self.all_filtered.len()
    }

    /// Number of visible assets.
    ///
    /// This is the size of the visible prefix, not of the whole filtered set;
    /// see [`PageState::matched_count`] for the latter.
    pub fn total_count(&self) -> usize {
        self.visible_assets().len()
    }

    /// Number of assets that matched the query.
    pub fn matched_count(&self) -> usize {
        self.all_filtered.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages handed out so far.
    pub fn pages_loaded(&self) -> usize {
        self.visible_count.div_ceil(self.page_size)
    }

    /// Check if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    /// Serializable view of the visible page.
    pub fn view(&self) -> PageView<'_> {
        PageView {
            assets: self.visible_assets(),
            total_count: self.total_count(),
            matched_count: self.matched_count(),
            has_more: self.has_more(),
            page_size: self.page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// What a renderer needs from a [`PageState`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a> {
    pub assets: &'a [NormalizedAsset],
    pub total_count: usize,
    pub matched_count: usize,
    pub has_more: bool,
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AssetId;

    fn assets(n: usize) -> Vec<NormalizedAsset> {
        (0..n)
            .map(|i| NormalizedAsset {
                id: AssetId::from_parts("0xA", &i.to_string()),
                name: format!("Asset #{}", i),
                image_url: "u".to_string(),
                description: String::new(),
                attributes: Vec::new(),
                collection: String::new(),
                chain: String::new(),
                mint_date: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_first_page() {
        let p = PageState::new(assets(30), 12);
        assert_eq!(p.visible_count(), 12);
        assert_eq!(p.total_count(), 12);
        assert_eq!(p.matched_count(), 30);
        assert!(p.has_more());
        assert_eq!(p.pages_loaded(), 1);
    }

    #[test]
    fn test_advance_to_exhaustion() {
        let mut p = PageState::new(assets(30), 12);
        assert!(p.advance());
        assert_eq!(p.visible_count(), 24);
        assert!(p.has_more());
        assert!(p.advance());
        assert_eq!(p.visible_count(), 30);
        assert!(!p.has_more());
        assert_eq!(p.pages_loaded(), 3);
        assert!(!p.advance());
        assert_eq!(p.visible_count(), 30);
    }

    #[test]
    fn test_small_set() {
        let p = PageState::new(assets(5), 12);
        assert_eq!(p.visible_count(), 5);
        assert!(!p.has_more());
    }

    #[test]
    fn test_empty() {
        let mut p = PageState::empty(12);
        assert!(p.is_empty());
        assert!(!p.has_more());
        assert!(!p.advance());
        assert_eq!(p.pages_loaded(), 0);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let p = PageState::new(assets(3), 0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.visible_count(), 1);
    }

    #[test]
    fn test_advanced_over_fresh_set() {
        let p = PageState::new(assets(30), 12);
        let next = p.advanced_over(assets(20));
        assert_eq!(next.visible_count(), 20);
        assert!(!next.has_more());

        let next = p.advanced_over(assets(40));
        assert_eq!(next.visible_count(), 24);
        assert!(next.has_more());
    }

    #[test]
    fn test_visible_prefix() {
        let p = PageState::new(assets(15), 12);
        let visible = p.visible_assets();
        assert_eq!(visible.len(), 12);
        assert_eq!(visible[0].name, "Asset #0");
        assert_eq!(visible[11].name, "Asset #11");
    }

    #[test]
    fn test_view_serializes() {
        let p = PageState::new(assets(15), 12);
        let json = serde_json::to_value(p.view()).unwrap();
        assert_eq!(json["totalCount"], 12);
        assert_eq!(json["matchedCount"], 15);
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["assets"].as_array().unwrap().len(), 12);
    }
}
