//! CLI command implementations.

pub mod chat;
pub mod config;
pub mod search;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search string, e.g. `blockchain:ethereum type:image #42 bored ape`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Number of pages to show.
    #[arg(short, long, default_value_t = 1, conflicts_with = "all")]
    pub pages: usize,

    /// Keep loading until every match is shown.
    #[arg(long)]
    pub all: bool,
}

impl SearchArgs {
    /// The search words joined back into one string.
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Asset id as `<contract_address>:<token_id>`.
    pub id: String,
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Message to send. Without one, starts an interactive session.
    #[arg(trailing_var_arg = true)]
    pub message: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Write a default artverse.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
