//! Vendor sniffing for incoming product links.
//!
//! Recognizes Amazon storefront and short-link hosts, pulls the ASIN out of
//! the many URL shapes Amazon uses, and expands `amzn.to` links. Every
//! function here is best-effort: "no match" is `false`/`None`, never an error.

use std::sync::LazyLock;

use regex::Regex;

static VENDOR_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\.)(?:amazon\.(?:com|co\.uk|ca|de|fr|it|es|co\.jp)|amzn\.to)$")
        .expect("valid vendor host regex")
});

static SHORT_LINK_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\.)amzn\.to$").expect("valid short-link regex"));

/// ASIN patterns, most specific first.
///
/// The bare ten-character segment rule is broad: any ten-character
/// alphanumeric path segment (`/headphones/`) is taken as an ID when none
/// of the marker patterns match. The order keeps `/dp/` and friends ahead
/// of it so genuine product links are unaffected.
static PRODUCT_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)/dp/([A-Z0-9]{10})",
        r"(?i)/gp/product/([A-Z0-9]{10})",
        r"(?i)/product/([A-Z0-9]{10})",
        r"(?i)/([A-Z0-9]{10})(?:/|\?|$)",
        r"(?i)amazon\.com.*?/([A-Z0-9]{10})(?:/|\?|$)",
        r"(?i)amzn\.to/([A-Z0-9]+)",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid product id regex"))
    .collect()
});

fn host_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
}

/// Returns `true` when the URL's host is an Amazon storefront (any supported
/// regional TLD) or the `amzn.to` short-link domain.
#[must_use]
pub fn is_recognized_vendor(url: &str) -> bool {
    host_of(url).is_some_and(|host| VENDOR_HOST_RE.is_match(&host))
}

/// Returns `true` for `amzn.to` short links, which carry no ASIN until resolved.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    host_of(url).is_some_and(|host| SHORT_LINK_HOST_RE.is_match(&host))
}

/// Extracts the upper-cased product ID from an Amazon URL.
///
/// For an unresolved short link the short-link token itself is returned.
#[must_use]
pub fn extract_product_id(url: &str) -> Option<String> {
    PRODUCT_ID_PATTERNS.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_ascii_uppercase())
    })
}

/// Follows redirects with a `HEAD` request and returns the final URL.
///
/// The final URL is returned even for a non-2xx answer: storefronts often
/// reject `HEAD` on the product page itself after the redirect has already
/// told us where the product lives.
pub async fn resolve_short_link(client: &reqwest::Client, url: &str) -> Option<String> {
    match client.head(url).send().await {
        Ok(response) => {
            let resolved = response.url().to_string();
            tracing::debug!(short_url = url, resolved = %resolved, status = %response.status(), "resolved short link");
            Some(resolved)
        }
        Err(e) => {
            tracing::warn!(short_url = url, error = %e, "short link resolution failed");
            None
        }
    }
}
