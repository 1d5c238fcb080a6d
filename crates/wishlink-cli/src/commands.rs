//! Subcommand handlers. Both print JSON to stdout; logs go to stderr.

use serde_json::{json, Value};
use wishlink_core::AppConfig;
use wishlink_scraper::{AmazonClient, MetadataFetcher, VendorIntegration};

/// Runs the full extraction for `url` and prints the resulting metadata.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or the result
/// cannot be serialized. Extraction itself never fails.
pub(crate) async fn run_fetch(config: &AppConfig, url: &str, compact: bool) -> anyhow::Result<()> {
    let fetcher = MetadataFetcher::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build metadata fetcher: {e}"))?;

    let metadata = fetcher.fetch_url_metadata(url).await;
    tracing::info!(url, resolved = %metadata.url, bare = metadata.is_bare(), "fetch complete");

    let rendered = if compact {
        serde_json::to_string(&metadata)?
    } else {
        serde_json::to_string_pretty(&metadata)?
    };
    println!("{rendered}");
    Ok(())
}

/// Prints the offline routing report for `url`.
///
/// # Errors
///
/// Returns an error if the vendor client cannot be built or the report
/// cannot be serialized.
pub(crate) fn run_inspect(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let vendor = AmazonClient::new(config.amazon.clone(), config.fetch_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build Amazon client: {e}"))?;
    println!("{}", serde_json::to_string_pretty(&inspect_report(&vendor, url))?);
    Ok(())
}

pub(crate) fn inspect_report<V: VendorIntegration>(vendor: &V, url: &str) -> Value {
    let recognized = vendor.recognizes(url);
    let product_id = if recognized {
        vendor.extract_product_id(url)
    } else {
        None
    };
    let canonical_url = product_id.as_deref().map(|id| vendor.canonical_url(id));

    json!({
        "url": url,
        "vendor": recognized.then(|| vendor.display_name()),
        "recognized": recognized,
        "shortLink": recognized && vendor.is_short_link(url),
        "productId": product_id,
        "canonicalUrl": canonical_url,
    })
}
