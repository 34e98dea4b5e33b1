//! Client for the catalog API.

use crate::{FetchClient, FetchError};
use artverse_catalog::catalog::CatalogRecord;
use artverse_catalog::{CatalogError, CatalogSource};
use async_trait::async_trait;

/// Path of the endpoint that lists the whole catalog.
pub const NFTS_PATH: &str = "/nfts";

/// [`CatalogSource`] backed by `GET {base_url}/nfts`.
///
/// A transport failure, a non-2xx status or a body that is not a JSON array
/// fails the fetch. Individual array elements are never rejected.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: FetchClient,
}

impl CatalogClient {
    /// Wrap a client whose base URL points at the catalog API.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Fetch and decode the record array.
    pub async fn fetch_records(&self) -> Result<Vec<CatalogRecord>, FetchError> {
        let request = self.client.get(NFTS_PATH).accept("application/json");
        let response = self.client.send(request).await?.error_for_status()?;
        let records: Vec<CatalogRecord> = response.json()?;
        tracing::debug!(records = records.len(), "fetched catalog");
        Ok(records)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.fetch_records().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchConfig;
    use artverse_catalog::catalog::Normalizer;
    use artverse_catalog::search::CatalogFeed;
    use httpmock::prelude::*;
    use serde_json::json;

    fn catalog_client(server: &MockServer) -> CatalogClient {
        let config = FetchConfig::new(server.base_url());
        CatalogClient::new(FetchClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_catalog() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/nfts");
                then.status(200).json_body(json!([
                    {
                        "contract_address": "0xA",
                        "token_id": "7",
                        "chain": "Polygon",
                        "raw_metadata": {"image": "http://x/7.png", "name": "Ape #7"}
                    },
                    {"token_id": 8},
                    "not a record"
                ]));
            })
            .await;

        let records = catalog_client(&server).fetch_catalog().await.unwrap();
        mock.assert_async().await;
        assert_eq!(records.len(), 3);
        assert!(records[2].is_empty());

        let asset = Normalizer::new().normalize(&records[0]);
        assert_eq!(asset.id.as_str(), "0xA:7");
        assert_eq!(asset.name, "Ape #7");
        assert_eq!(asset.image_url, "http://x/7.png");
    }

    #[tokio::test]
    async fn test_server_error_fails_fetch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/nfts");
                then.status(500).body("boom");
            })
            .await;

        let err = catalog_client(&server).fetch_catalog().await.unwrap_err();
        assert_eq!(err, CatalogError::Fetch("HTTP 500: boom".to_string()));
    }

    #[tokio::test]
    async fn test_non_array_body_fails_fetch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/nfts");
                then.status(200).json_body(json!({"error": "not ready"}));
            })
            .await;

        let err = catalog_client(&server).fetch_catalog().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_feed_over_http() {
        let server = MockServer::start_async().await;
        let records: Vec<_> = (0..15)
            .map(|i| json!({"contract_address": "0xC", "token_id": i.to_string(), "chain": "Ethereum"}))
            .collect();
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/nfts");
                then.status(200).json_body(json!(records));
            })
            .await;

        let feed = CatalogFeed::new(catalog_client(&server));
        let page = feed.reset("chain:ethereum").await;
        assert_eq!(page.visible_count(), 12);
        let page = feed.load_more().await;
        assert_eq!(page.visible_count(), 15);
        assert!(!page.has_more());
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_unreachable_server_leaves_feed_empty() {
        let config = FetchConfig::new("http://127.0.0.1:9");
        let feed = CatalogFeed::new(CatalogClient::new(FetchClient::new(config).unwrap()));
        let page = feed.reset("").await;
        assert!(page.is_empty());
        assert!(!page.has_more());
    }
}
