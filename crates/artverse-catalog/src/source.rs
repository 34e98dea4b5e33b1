//! Where catalog records come from.

use crate::catalog::CatalogRecord;
use crate::error::CatalogError;
use async_trait::async_trait;
use std::sync::Arc;

/// A catalog that can be fetched in full.
///
/// There are no query parameters: all filtering and paging happens on the
/// caller's side after the whole array has arrived.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every record the catalog has.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        (**self).fetch_catalog().await
    }
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        (**self).fetch_catalog().await
    }
}

/// A catalog held in memory, e.g. loaded from a JSON export of `/nfts`.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<CatalogRecord>,
}

impl StaticCatalog {
    /// Wrap already decoded records.
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Decode a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_catalog_from_json() {
        let catalog = StaticCatalog::from_json_str(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
        let records = catalog.fetch_catalog().await.unwrap();
        assert_eq!(records[1].text("name").as_deref(), Some("B"));
    }

    #[test]
    fn test_static_catalog_rejects_non_array() {
        let err = StaticCatalog::from_json_str(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_boxed_source() {
        let source: Box<dyn CatalogSource> = Box::new(StaticCatalog::default());
        assert!(source.fetch_catalog().await.unwrap().is_empty());
    }
}
