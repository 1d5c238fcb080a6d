//! Single entry point turning a product link into [`UrlMetadata`].
//!
//! Recognized vendor links go through the vendor's structured API first;
//! everything else (and every vendor miss) is scraped. No step is retried
//! and no failure escapes: the worst case is a bare result carrying only
//! the link.

use std::future::Future;
use std::time::Duration;

use wishlink_core::{AppConfig, UrlMetadata};

use crate::amazon::AmazonClient;
use crate::error::ScraperError;
use crate::html;
use crate::types::VendorProductInfo;

/// A first-party vendor with a structured product API.
///
/// The orchestrator only ever asks a vendor for *additional* precision; the
/// generic scraper remains the fallback for anything the vendor cannot
/// answer.
pub trait VendorIntegration: Send + Sync {
    /// Name reported as `siteName` for vendor API results.
    fn display_name(&self) -> &str;

    fn recognizes(&self, url: &str) -> bool;

    fn is_short_link(&self, url: &str) -> bool;

    /// Expands a short link; `None` on any failure.
    fn resolve_short_link(&self, url: &str) -> impl Future<Output = Option<String>> + Send;

    fn extract_product_id(&self, url: &str) -> Option<String>;

    /// Clean outbound link for a product, carrying the referral tag.
    fn canonical_url(&self, product_id: &str) -> String;

    /// Structured lookup; `None` when unavailable or failed.
    fn fetch_product_info(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Option<VendorProductInfo>> + Send;
}

enum VendorOutcome {
    /// The vendor answered; scraping is skipped.
    Found(UrlMetadata),
    /// Scrape this URL instead (possibly resolved or canonicalized).
    Fallback(String),
}

/// Stateless metadata extractor. Cheap to clone and safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct MetadataFetcher<V = AmazonClient> {
    client: reqwest::Client,
    vendor: V,
    user_agent: String,
    timeout: Duration,
}

impl MetadataFetcher<AmazonClient> {
    /// Builds a fetcher backed by the Amazon integration configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let vendor = AmazonClient::new(config.amazon.clone(), config.fetch_timeout_secs)?;
        Self::with_vendor(vendor, config.fetch_timeout_secs, &config.user_agent)
    }
}

impl<V: VendorIntegration> MetadataFetcher<V> {
    /// Builds a fetcher around an arbitrary vendor integration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the page-fetching client cannot be constructed.
    pub fn with_vendor(vendor: V, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            vendor,
            user_agent: user_agent.to_owned(),
            timeout,
        })
    }

    pub fn vendor(&self) -> &V {
        &self.vendor
    }

    /// Extracts title, image, price and site name for `url`.
    ///
    /// Never fails. The returned `url` is the link to store: the canonical
    /// affiliate link for vendor products, otherwise the (resolved) input.
    pub async fn fetch_url_metadata(&self, url: &str) -> UrlMetadata {
        let mut target = url.to_owned();

        if self.vendor.recognizes(&target) {
            match self.vendor_lookup(target).await {
                VendorOutcome::Found(metadata) => return metadata,
                VendorOutcome::Fallback(fallback) => target = fallback,
            }
        }

        self.scrape(target).await
    }

    async fn vendor_lookup(&self, mut url: String) -> VendorOutcome {
        if self.vendor.is_short_link(&url) {
            match self.vendor.resolve_short_link(&url).await {
                Some(resolved) => url = resolved,
                None => tracing::warn!(url = %url, "keeping unresolved short link"),
            }
        }

        let Some(product_id) = self.vendor.extract_product_id(&url) else {
            tracing::debug!(url = %url, "no product id in vendor URL; scraping instead");
            return VendorOutcome::Fallback(url);
        };

        if let Some(info) = self.vendor.fetch_product_info(&product_id).await {
            return VendorOutcome::Found(UrlMetadata {
                title: info.title,
                site_name: Some(self.vendor.display_name().to_owned()),
                image_url: info.image_url,
                price: info.price,
                url: info.canonical_url,
            });
        }

        let canonical = self.vendor.canonical_url(&product_id);
        tracing::info!(
            product_id = %product_id,
            canonical = %canonical,
            "vendor lookup failed; scraping canonical URL"
        );
        VendorOutcome::Fallback(canonical)
    }

    async fn scrape(&self, url: String) -> UrlMetadata {
        let Some(page) = html::fetch_html(&self.client, &url, &self.user_agent, self.timeout).await
        else {
            return UrlMetadata::bare(url);
        };

        UrlMetadata {
            title: html::extract_title(&page),
            image_url: html::extract_image(&page, &url),
            price: html::extract_price(&page),
            site_name: Some(html::extract_site_name(&page, &url)),
            url,
        }
    }
}

/// One-shot convenience wrapper around [`MetadataFetcher::from_config`].
///
/// Long-lived callers should build a [`MetadataFetcher`] once and reuse it.
pub async fn fetch_url_metadata(config: &AppConfig, url: &str) -> UrlMetadata {
    match MetadataFetcher::from_config(config) {
        Ok(fetcher) => fetcher.fetch_url_metadata(url).await,
        Err(e) => {
            tracing::error!(url, error = %e, "could not build metadata fetcher");
            UrlMetadata::bare(url)
        }
    }
}
