//! Show one asset in full.

use anyhow::{bail, Result};
use artverse_catalog::catalog::NormalizedAsset;
use artverse_catalog::search::PageState;
use artverse_catalog::AssetId;

use super::ShowArgs;
use crate::context::Context;
use crate::output::asset_detail;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let id = AssetId::new(args.id);
    let feed = ctx.feed(ctx.catalog_source()?);

    let spinner = ctx.output.spinner("Fetching NFTs...");
    let page = feed.reset("").await;
    spinner.finish_and_clear();

    let asset = find_asset(&page, &id)?;
    if ctx.output.is_json() {
        ctx.output.json(asset);
    } else {
        ctx.output.block(&asset_detail(asset));
    }
    Ok(())
}

/// Look `id` up in the unfiltered catalog. An empty catalog usually means the
/// fetch failed, so it gets its own message.
fn find_asset<'a>(page: &'a PageState, id: &AssetId) -> Result<&'a NormalizedAsset> {
    if page.matched_count() == 0 {
        bail!("Catalog is empty or could not be fetched; check --api-url, --catalog-file or your connection");
    }
    match page.all_filtered().iter().find(|a| &a.id == id) {
        Some(asset) => Ok(asset),
        None => bail!("No NFT with id {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artverse_catalog::search::DEFAULT_PAGE_SIZE;

    fn asset(token: &str) -> NormalizedAsset {
        NormalizedAsset {
            id: AssetId::from_parts("0xBC4C", token),
            name: format!("Ape #{}", token),
            image_url: "https://img/x.png".to_string(),
            description: String::new(),
            attributes: Vec::new(),
            collection: String::new(),
            chain: "Ethereum".to_string(),
            mint_date: String::new(),
        }
    }

    #[test]
    fn test_find_asset_beyond_first_page() {
        let assets: Vec<_> = (0..20).map(|i| asset(&i.to_string())).collect();
        let page = PageState::new(assets, DEFAULT_PAGE_SIZE);
        let found = find_asset(&page, &AssetId::from_parts("0xBC4C", "17")).unwrap();
        assert_eq!(found.name, "Ape #17");
    }

    #[test]
    fn test_missing_id_names_the_id() {
        let page = PageState::new(vec![asset("1")], DEFAULT_PAGE_SIZE);
        let err = find_asset(&page, &AssetId::new("0xBC4C:9")).unwrap_err();
        assert_eq!(err.to_string(), "No NFT with id 0xBC4C:9");
    }

    #[test]
    fn test_empty_catalog_points_at_the_source() {
        let page = PageState::empty(DEFAULT_PAGE_SIZE);
        let err = find_asset(&page, &AssetId::new("0xBC4C:1")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("could not be fetched"));
        assert!(message.contains("--api-url"));
    }
}
