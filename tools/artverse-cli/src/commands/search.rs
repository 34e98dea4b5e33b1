//! Search the catalog.

use anyhow::Result;
use artverse_catalog::search::PageState;

use super::SearchArgs;
use crate::context::Context;
use crate::output::{asset_card, found_header};

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let query = args.query_string();
    let feed = ctx.feed(ctx.catalog_source()?);

    let spinner = ctx.output.spinner("Fetching NFTs...");
    let mut page = feed.reset(&query).await;
    let mut loaded = 1;
    while page.has_more() && (args.all || loaded < args.pages) {
        spinner.set_message(format!("Loading page {}...", loaded + 1));
        page = feed.load_more().await;
        loaded += 1;
    }
    spinner.finish_and_clear();

    tracing::info!(
        query = %query,
        visible = page.visible_count(),
        matched = page.matched_count(),
        "search complete"
    );
    render(&page, ctx);
    Ok(())
}

fn render(page: &PageState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&page.view());
        return;
    }

    if page.is_empty() {
        ctx.output.header("No NFTs found");
        ctx.output.info("Try adjusting your search or filters");
        return;
    }

    ctx.output.header(&found_header(page.total_count()));
    for asset in page.visible_assets() {
        ctx.output.block("");
        ctx.output.block(&asset_card(asset));
    }

    if page.has_more() {
        ctx.output.block("");
        ctx.output.info(&format!(
            "{} more match(es). Use --pages or --all to load more.",
            page.matched_count() - page.visible_count()
        ));
    }
}
