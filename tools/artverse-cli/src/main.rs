//! Artverse CLI - search the NFT catalog and talk to the NFT assistant.
//!
//! Commands:
//! - `artverse search` - Search the catalog with the query mini-language
//! - `artverse show` - Show one NFT in full
//! - `artverse chat` - Ask the NFT assistant
//! - `artverse config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ChatArgs, ConfigArgs, SearchArgs, ShowArgs};

/// Artverse CLI - Discover NFTs from the terminal
#[derive(Parser)]
#[command(name = "artverse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog API base URL (overrides catalog.api_base_url)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read the catalog from a JSON file instead of the API
    #[arg(long, global = true)]
    catalog_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search(SearchArgs),

    /// Show one NFT in full
    Show(ShowArgs),

    /// Chat with the NFT assistant
    Chat(ChatArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn,artverse=info",
        1 => "info,artverse=debug",
        2 => "debug,artverse=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Setup output formatting
    let output = output::Output::new(cli.verbose > 0, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx
            .with_api_url(cli.api_url)
            .with_catalog_file(cli.catalog_file.as_deref()),
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Chat(args) => commands::chat::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
