//! Amazon Product Advertising API (PA-API 5.0) client.
//!
//! Looks up title, primary image and listing price for an ASIN with a
//! SigV4-signed `GetItems` call, and builds clean affiliate links. Missing
//! credentials disable the lookup without being an error: the caller falls
//! back to scraping.

mod signing;
mod types;

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};
use wishlink_core::AmazonCredentials;

use crate::error::ScraperError;
use crate::metadata::VendorIntegration;
use crate::resolver;
use crate::types::VendorProductInfo;

use self::signing::{sign_request, SigningKey, CONTENT_ENCODING, CONTENT_TYPE, GET_ITEMS_TARGET};
use self::types::{GetItemsRequest, GetItemsResponse, RESOURCES};

const DEFAULT_ENDPOINT: &str = "https://webservices.amazon.com";
const GET_ITEMS_PATH: &str = "/paapi5/getitems";
const REGION: &str = "us-east-1";
const SERVICE: &str = "ProductAdvertisingAPI";
const PARTNER_TYPE: &str = "Associates";

/// Affiliate tag used in links when `AMAZON_ASSOCIATE_TAG` is not configured.
pub const DEFAULT_PARTNER_TAG: &str = "giftwishlist-20";

/// Display name reported as `siteName` for PA-API results.
pub const SITE_NAME: &str = "Amazon";

/// Client for the PA-API `GetItems` operation.
///
/// Use [`AmazonClient::new`] for production or [`AmazonClient::with_endpoint`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct AmazonClient {
    client: Client,
    credentials: AmazonCredentials,
    endpoint: Url,
    /// `host[:port]` of `endpoint`, as it appears in the signed `host` header.
    signing_host: String,
}

impl AmazonClient {
    /// Creates a client pointed at the production PA-API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: AmazonCredentials, timeout_secs: u64) -> Result<Self, ScraperError> {
        Self::with_endpoint(credentials, timeout_secs, DEFAULT_ENDPOINT)
    }

    /// Creates a client with a custom API endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidUrl`] if `endpoint` has no host.
    pub fn with_endpoint(
        credentials: AmazonCredentials,
        timeout_secs: u64,
        endpoint: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .build()?;

        let invalid = |reason: &str| ScraperError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: reason.to_owned(),
        };
        let endpoint_url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| invalid("endpoint has no host"))?;
        let signing_host = match endpoint_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };

        Ok(Self {
            client,
            credentials,
            endpoint: endpoint_url,
            signing_host,
        })
    }

    /// Builds `https://www.amazon.com/dp/{asin}?tag={partner_tag}`.
    #[must_use]
    pub fn build_canonical_url(&self, asin: &str) -> String {
        let tag = self
            .credentials
            .partner_tag
            .as_deref()
            .unwrap_or(DEFAULT_PARTNER_TAG);
        format!("https://www.amazon.com/dp/{asin}?tag={tag}")
    }

    /// Looks up an ASIN via PA-API.
    ///
    /// Returns `None` when credentials are incomplete, the API answers with a
    /// non-2xx status or no items, or anything fails on the way. Failures are
    /// logged, never returned.
    pub async fn fetch_product_info(&self, asin: &str) -> Option<VendorProductInfo> {
        let Some((access_key, secret_key, partner_tag)) = self.credentials.complete() else {
            tracing::warn!(asin, "PA-API credentials not configured; skipping Amazon lookup");
            return None;
        };

        tracing::info!(asin, "fetching Amazon product info");
        let key = SigningKey {
            access_key,
            secret_key,
            host: &self.signing_host,
            region: REGION,
            service: SERVICE,
        };

        match self.request_product_info(&key, asin, partner_tag).await {
            Ok(Some(info)) => Some(info),
            Ok(None) => {
                tracing::warn!(asin, "no items returned from PA-API");
                None
            }
            Err(e) => {
                tracing::warn!(asin, error = %e, "PA-API lookup failed");
                None
            }
        }
    }

    async fn request_product_info(
        &self,
        key: &SigningKey<'_>,
        asin: &str,
        partner_tag: &str,
    ) -> Result<Option<VendorProductInfo>, ScraperError> {
        let payload = serde_json::to_string(&GetItemsRequest {
            item_ids: [asin],
            partner_tag,
            partner_type: PARTNER_TYPE,
            resources: RESOURCES,
        })
        .map_err(|e| ScraperError::Deserialize {
            context: format!("GetItems request body for {asin}"),
            source: e,
        })?;

        let signed = sign_request(key, "POST", GET_ITEMS_PATH, &payload, Utc::now())?;

        let url = self
            .endpoint
            .join(GET_ITEMS_PATH)
            .map_err(|e| ScraperError::InvalidUrl {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url.clone())
            .header("content-encoding", CONTENT_ENCODING)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-target", GET_ITEMS_TARGET)
            .header(reqwest::header::AUTHORIZATION, &signed.authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(asin, status = status.as_u16(), body = %body, "PA-API error body");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: GetItemsResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("GetItems response for {asin}"),
                source: e,
            })?;

        let Some(item) = parsed
            .items_result
            .and_then(|result| result.items.into_iter().next())
        else {
            return Ok(None);
        };

        Ok(Some(VendorProductInfo {
            title: item.title(),
            image_url: item.image_url(),
            price: item.display_price(),
            canonical_url: self.build_canonical_url(asin),
        }))
    }
}

impl VendorIntegration for AmazonClient {
    fn display_name(&self) -> &str {
        SITE_NAME
    }

    fn recognizes(&self, url: &str) -> bool {
        resolver::is_recognized_vendor(url)
    }

    fn is_short_link(&self, url: &str) -> bool {
        resolver::is_short_link(url)
    }

    async fn resolve_short_link(&self, url: &str) -> Option<String> {
        resolver::resolve_short_link(&self.client, url).await
    }

    fn extract_product_id(&self, url: &str) -> Option<String> {
        resolver::extract_product_id(url)
    }

    fn canonical_url(&self, product_id: &str) -> String {
        self.build_canonical_url(product_id)
    }

    async fn fetch_product_info(&self, product_id: &str) -> Option<VendorProductInfo> {
        AmazonClient::fetch_product_info(self, product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(tag: Option<&str>) -> AmazonCredentials {
        AmazonCredentials {
            access_key: Some("AKIDEXAMPLE".to_string()),
            secret_key: Some("secret".to_string()),
            partner_tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn canonical_url_uses_configured_tag() {
        let client = AmazonClient::new(credentials(Some("mytag-20")), 10).unwrap();
        assert_eq!(
            client.build_canonical_url("B08N5WRWNW"),
            "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20"
        );
    }

    #[test]
    fn canonical_url_falls_back_to_default_tag() {
        let client = AmazonClient::new(AmazonCredentials::default(), 10).unwrap();
        assert_eq!(
            client.build_canonical_url("B08N5WRWNW"),
            "https://www.amazon.com/dp/B08N5WRWNW?tag=giftwishlist-20"
        );
    }

    #[test]
    fn signing_host_keeps_non_default_port() {
        let client =
            AmazonClient::with_endpoint(credentials(None), 10, "http://127.0.0.1:8123").unwrap();
        assert_eq!(client.signing_host, "127.0.0.1:8123");

        let client = AmazonClient::new(credentials(None), 10).unwrap();
        assert_eq!(client.signing_host, "webservices.amazon.com");
    }

    #[test]
    fn with_endpoint_rejects_garbage() {
        let err = AmazonClient::with_endpoint(credentials(None), 10, "not a url").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidUrl { .. }),
            "expected InvalidUrl, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit_without_network() {
        // Port 9 (discard) is never contacted: the credential check returns first.
        let client = AmazonClient::with_endpoint(
            credentials(None),
            1,
            "http://127.0.0.1:9",
        )
        .unwrap();
        assert!(client.fetch_product_info("B08N5WRWNW").await.is_none());
    }
}
