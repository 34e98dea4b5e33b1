//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use artverse_catalog::catalog::{Normalizer, DEFAULT_FALLBACK_IMAGE_URL};
use artverse_catalog::search::{FeedConfig, DEFAULT_PAGE_SIZE};
use artverse_data::chat::DEFAULT_SESSION_ID;
use serde::{Deserialize, Serialize};

/// Catalog API used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://nft-wikepedia-api.onrender.com";

/// Chat webhook used when none is configured.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n-edafe.onrender.com/webhook/b1be177e-c4dc-4446-83fd-94b55215d553";

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["artverse.toml", ".artverse.toml", "artverse.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API and feed settings.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Chat webhook settings.
    #[serde(default)]
    pub chat: ChatSettings,
}

impl CliConfig {
    /// Load config from a file. Files ending in `.json` are JSON, anything
    /// else is TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Problems that make the configuration unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !is_http_url(&self.catalog.api_base_url) {
            errors.push("catalog.api_base_url must be an http(s) URL".to_string());
        }
        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be greater than 0".to_string());
        }
        if let Some(url) = &self.catalog.fallback_image_url {
            if !is_http_url(url) {
                errors.push("catalog.fallback_image_url must be an http(s) URL".to_string());
            }
        }
        if self.catalog.timeout_secs == Some(0) {
            errors.push("catalog.timeout_secs must be greater than 0".to_string());
        }
        if !is_http_url(&self.chat.webhook_url) {
            errors.push("chat.webhook_url must be an http(s) URL".to_string());
        }
        errors
    }

    /// Look up one dotted key, rendered as a JSON value.
    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["catalog", "api_base_url"] => quoted(&self.catalog.api_base_url),
            ["catalog", "page_size"] => self.catalog.page_size.to_string(),
            ["catalog", "fallback_image_url"] => quoted(self.catalog.fallback_image_url()),
            ["catalog", "refetch_on_load_more"] => self.catalog.refetch_on_load_more.to_string(),
            ["catalog", "timeout_secs"] => self
                .catalog
                .timeout_secs
                .map(|s| s.to_string())
                .unwrap_or_else(|| "null".to_string()),
            ["chat", "webhook_url"] => quoted(&self.chat.webhook_url),
            ["chat", "session_id"] => quoted(&self.chat.session_id),
            _ => bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog API; records are read from `{base}/nfts`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Assets per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Image shown for records without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_image_url: Option<String>,

    /// Refetch the catalog on every "load more".
    #[serde(default = "default_true")]
    pub refetch_on_load_more: bool,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl CatalogSettings {
    pub fn fallback_image_url(&self) -> &str {
        self.fallback_image_url
            .as_deref()
            .unwrap_or(DEFAULT_FALLBACK_IMAGE_URL)
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.page_size,
            refetch_on_load_more: self.refetch_on_load_more,
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new().with_fallback_image_url(self.fallback_image_url())
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            fallback_image_url: None,
            refetch_on_load_more: true,
            timeout_secs: None,
        }
    }
}

/// `[chat]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,

    #[serde(default = "default_session_id")]
    pub session_id: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            session_id: default_session_id(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

/// Generate a default artverse.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Artverse configuration

[catalog]
api_base_url = "{api}"
page_size = {page_size}
refetch_on_load_more = true
# fallback_image_url = "{fallback}"
# timeout_secs = 30

[chat]
webhook_url = "{webhook}"
session_id = "{session}"
"#,
        api = DEFAULT_API_BASE_URL,
        page_size = DEFAULT_PAGE_SIZE,
        fallback = DEFAULT_FALLBACK_IMAGE_URL,
        webhook = DEFAULT_WEBHOOK_URL,
        session = DEFAULT_SESSION_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
[catalog]
api_base_url = "http://localhost:8080"
page_size = 24
timeout_secs = 10

[chat]
session_id = "terminal"
"#,
        );

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.catalog.api_base_url, "http://localhost:8080");
        assert_eq!(config.catalog.page_size, 24);
        assert!(config.catalog.refetch_on_load_more);
        assert_eq!(config.catalog.timeout_secs, Some(10));
        assert_eq!(config.chat.session_id, "terminal");
        assert_eq!(config.chat.webhook_url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_load_json() {
        let file = write_config(".json", r#"{"catalog": {"refetch_on_load_more": false}}"#);
        let config = CliConfig::load(file.path()).unwrap();
        assert!(!config.catalog.refetch_on_load_more);
        assert_eq!(config.catalog.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.chat, ChatSettings::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let file = write_config(".toml", "[catalog\npage_size = 3");
        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_generated_config_is_default() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        config.catalog.api_base_url = "ftp://catalog".to_string();
        config.catalog.page_size = 0;
        config.chat.webhook_url = "https://".to_string();

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("api_base_url"));
        assert!(errors[1].contains("page_size"));
        assert!(errors[2].contains("webhook_url"));
    }

    #[test]
    fn test_get_value() {
        let config = CliConfig::default();
        assert_eq!(config.get_value("catalog.page_size").unwrap(), "12");
        assert_eq!(
            config.get_value("chat.session_id").unwrap(),
            r#""nft-chat-widget-session""#
        );
        assert_eq!(config.get_value("catalog.timeout_secs").unwrap(), "null");
        assert!(config.get_value("catalog.nope").is_err());
    }

    #[test]
    fn test_settings_feed_catalog_types() {
        let mut settings = CatalogSettings::default();
        settings.page_size = 6;
        settings.refetch_on_load_more = false;
        settings.fallback_image_url = Some("https://cdn/none.png".to_string());

        assert_eq!(
            settings.feed_config(),
            FeedConfig {
                page_size: 6,
                refetch_on_load_more: false
            }
        );
        assert_eq!(settings.normalizer().fallback_image_url(), "https://cdn/none.png");
    }
}
