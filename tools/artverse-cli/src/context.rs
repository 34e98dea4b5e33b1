//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use artverse_catalog::search::CatalogFeed;
use artverse_catalog::{CatalogSource, StaticCatalog};
use artverse_data::chat::{ChatSession, WebhookClient};
use artverse_data::{CatalogClient, FetchClient, FetchConfig};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Catalog source picked at runtime.
pub type DynSource = Box<dyn CatalogSource>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Read records from this JSON file instead of the catalog API.
    pub catalog_file: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            catalog_file: None,
        })
    }

    /// Override the catalog API base URL.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.config.catalog.api_base_url = url;
        }
        self
    }

    /// Serve the catalog from a local JSON export.
    pub fn with_catalog_file(mut self, path: Option<&str>) -> Self {
        self.catalog_file = path.map(|p| self.resolve_path(p));
        self
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some((config_path, config)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// HTTP client settings for a service at `base_url`.
    fn fetch_client(&self, base_url: Option<&str>) -> Result<FetchClient> {
        let mut config = FetchConfig {
            base_url: base_url.map(str::to_string),
            ..FetchConfig::default()
        };
        if let Some(secs) = self.config.catalog.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        FetchClient::new(config).context("Failed to create HTTP client")
    }

    /// The catalog to search: the local file when one was given, else the API.
    pub fn catalog_source(&self) -> Result<DynSource> {
        if let Some(path) = &self.catalog_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
            let catalog = StaticCatalog::from_json_str(&content)
                .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
            self.output
                .debug(&format!("Loaded {} record(s) from {}", catalog.len(), path.display()));
            return Ok(Box::new(catalog));
        }

        let client = self.fetch_client(Some(self.config.catalog.api_base_url.as_str()))?;
        self.output
            .debug(&format!("Using catalog API at {}", self.config.catalog.api_base_url));
        Ok(Box::new(CatalogClient::new(client)))
    }

    /// A feed over `source` with the configured paging and fallbacks.
    pub fn feed<S: CatalogSource>(&self, source: S) -> CatalogFeed<S> {
        CatalogFeed::new(source)
            .with_config(self.config.catalog.feed_config())
            .with_normalizer(self.config.catalog.normalizer())
    }

    /// A chat session talking to the configured webhook.
    pub fn chat_session(&self) -> Result<ChatSession<WebhookClient>> {
        let client = self.fetch_client(None)?;
        let webhook = WebhookClient::new(client, self.config.chat.webhook_url.as_str());
        Ok(ChatSession::new(webhook).with_session_id(self.config.chat.session_id.as_str()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_up() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(".artverse.toml"),
            "[catalog]\npage_size = 4\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (path, config) = Context::find_config(&nested).unwrap();
        assert_eq!(path, root.path().join(".artverse.toml"));
        assert_eq!(config.catalog.page_size, 4);
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("artverse.toml"), "[chat]\nsession_id = \"toml\"\n").unwrap();
        std::fs::write(root.path().join("artverse.json"), r#"{"chat": {"session_id": "json"}}"#).unwrap();

        let (_, config) = Context::find_config(root.path()).unwrap();
        assert_eq!(config.chat.session_id, "toml");
    }

    #[tokio::test]
    async fn test_catalog_file_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nfts.json");
        std::fs::write(
            &file,
            r#"[{"contract_address": "0xA", "token_id": "1", "chain": "Ethereum"},
                {"contract_address": "0xA", "token_id": "2", "chain": "Polygon"}]"#,
        )
        .unwrap();

        let ctx = Context::load(None, Output::new(false, true))
            .unwrap()
            .with_catalog_file(file.to_str());
        let feed = ctx.feed(ctx.catalog_source().unwrap());
        let page = feed.reset("chain:polygon").await;
        assert_eq!(page.matched_count(), 1);
        assert_eq!(page.visible_assets()[0].id.as_str(), "0xA:2");
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let ctx = Context::load(None, Output::new(false, true))
            .unwrap()
            .with_catalog_file(Some("/definitely/not/here.json"));
        let err = ctx.catalog_source().err().unwrap();
        assert!(format!("{:#}", err).contains("Failed to read catalog file"));
    }

    #[test]
    fn test_api_url_override() {
        let ctx = Context::load(None, Output::new(false, true))
            .unwrap()
            .with_api_url(Some("http://localhost:3000".to_string()));
        assert_eq!(ctx.config.catalog.api_base_url, "http://localhost:3000");
    }
}
