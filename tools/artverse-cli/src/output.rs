//! Output formatting for the CLI.

use artverse_catalog::catalog::NormalizedAsset;
use artverse_data::chat::{ChatMessage, MediaItem, Role};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a preformatted block.
    pub fn block(&self, text: &str) {
        if self.json {
            return;
        }
        println!("{}", text);
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Result header, e.g. `1 NFT found`, `1,204 NFTs found`.
pub fn found_header(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} NFT{} found", format_count(count), plural)
}

/// Group digits by thousands.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Compact grid card: name, id, collection/chain, first attributes, mint date.
pub fn asset_card(asset: &NormalizedAsset) -> String {
    let mut lines = vec![format!(
        "{}  {}",
        style(&asset.name).bold(),
        style(asset.id.as_str()).dim()
    )];

    let origin: Vec<&str> = [asset.collection.as_str(), asset.chain.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !origin.is_empty() {
        lines.push(format!("  {}", origin.join(" · ")));
    }

    if !asset.attributes.is_empty() {
        let mut traits: Vec<String> = asset
            .preview_attributes()
            .iter()
            .map(|a| format!("{}: {}", a.trait_type, a.value))
            .collect();
        let hidden = asset.attributes.len() - asset.preview_attributes().len();
        if hidden > 0 {
            traits.push(format!("+{} more", hidden));
        }
        lines.push(format!("  {}", style(traits.join(" | ")).cyan()));
    }

    if let Some(date) = asset.mint_date_display() {
        lines.push(format!("  {}", style(format!("Minted {}", date)).dim()));
    }
    lines.join("\n")
}

/// Full detail view of one asset.
pub fn asset_detail(asset: &NormalizedAsset) -> String {
    let mut lines = vec![
        style(&asset.name).bold().underlined().to_string(),
        format!("  {}: {}", style("id").dim(), asset.id),
        format!("  {}: {}", style("image").dim(), asset.image_url),
    ];
    for (key, value) in [("collection", &asset.collection), ("chain", &asset.chain)] {
        if !value.is_empty() {
            lines.push(format!("  {}: {}", style(key).dim(), value));
        }
    }
    if let Some(date) = asset.mint_date_display() {
        lines.push(format!("  {}: {}", style("minted").dim(), date));
    }
    if !asset.description.is_empty() {
        lines.push(String::new());
        lines.push(asset.description.clone());
    }
    if !asset.attributes.is_empty() {
        lines.push(String::new());
        lines.push(style("Attributes").bold().to_string());
        for attr in &asset.attributes {
            lines.push(format!("  {} {}: {}", style("•").dim(), attr.trait_type, attr.value));
        }
    }
    lines.join("\n")
}

/// One transcript entry with its media.
pub fn chat_message(message: &ChatMessage) -> String {
    let speaker = match message.role {
        Role::User => style("you").green().bold(),
        Role::Assistant => style("SA").magenta().bold(),
    };
    let mut lines = vec![format!("{} {}", speaker, message.content)];
    for item in &message.media {
        let Some(url) = item.url() else { continue };
        let line = match item {
            MediaItem::Image(_) => format!("   [image] {} <{}>", item.display_title(), url),
            _ => match item.description() {
                Some(desc) => format!("   [link] {} <{}> - {}", item.display_title(), url, desc),
                None => format!("   [link] {} <{}>", item.display_title(), url),
            },
        };
        lines.push(style(line).dim().to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use artverse_catalog::catalog::Attribute;
    use artverse_catalog::AssetId;
    use artverse_data::chat::MediaLink;

    fn asset() -> NormalizedAsset {
        NormalizedAsset {
            id: AssetId::from_parts("0xBC4C", "42"),
            name: "Bored Ape #42".to_string(),
            image_url: "https://img/42.png".to_string(),
            description: "A sleepy primate".to_string(),
            attributes: vec![
                Attribute::new("Fur", "Gold"),
                Attribute::new("Eyes", "Sleepy"),
                Attribute::new("Hat", "None"),
                Attribute::new("Mouth", "Grin"),
                Attribute::new("Background", "Purple"),
            ],
            collection: "BAYC".to_string(),
            chain: "Ethereum".to_string(),
            mint_date: "2021-04-30T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_found_header() {
        assert_eq!(found_header(0), "0 NFTs found");
        assert_eq!(found_header(1), "1 NFT found");
        assert_eq!(found_header(1204), "1,204 NFTs found");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_asset_card() {
        let card = asset_card(&asset());
        assert!(card.contains("Bored Ape #42"));
        assert!(card.contains("0xBC4C:42"));
        assert!(card.contains("Fur: Gold"));
        assert!(card.contains("Hat: None"));
        assert!(!card.contains("Mouth"));
        assert!(card.contains("+2 more"));
        assert!(card.contains("Minted 2021-04-30"));
    }

    #[test]
    fn test_asset_detail_lists_everything() {
        let detail = asset_detail(&asset());
        assert!(detail.contains("A sleepy primate"));
        assert!(detail.contains("Background: Purple"));
        assert!(detail.contains("https://img/42.png"));
    }

    #[test]
    fn test_chat_message_media() {
        let message = ChatMessage {
            id: 2,
            role: Role::Assistant,
            content: "Here you go".to_string(),
            timestamp: Default::default(),
            media: vec![MediaItem::Link(MediaLink {
                url: "https://market/42".to_string(),
                title: None,
                description: Some("Floor 30 ETH".to_string()),
            })],
        };
        let text = chat_message(&message);
        assert!(text.contains("Here you go"));
        assert!(text.contains("[link] View NFT <https://market/42> - Floor 30 ETH"));
    }
}
