use std::sync::LazyLock;

use regex::Regex;

use super::{compile_patterns, first_capture, first_decoded_capture};

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)<meta[^>]*property=["']og:title["'][^>]*content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*property=["']og:title["']"#,
        r#"(?i)<meta[^>]*name=["']twitter:title["'][^>]*content=["']([^"']+)["']"#,
        // Amazon product page
        r#"(?i)<span[^>]*id=["']productTitle["'][^>]*>([^<]+)<"#,
        r"(?i)<title[^>]*>([^<]+)</title>",
    ])
});

static IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)<meta[^>]*property=["']og:image["'][^>]*content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*property=["']og:image["']"#,
        r#"(?i)<meta[^>]*name=["']twitter:image["'][^>]*content=["']([^"']+)["']"#,
        // Amazon main image
        r#"(?i)<img[^>]*id=["']landingImage["'][^>]*src=["']([^"']+)["']"#,
        r#"(?i)<img[^>]*data-old-hires=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*itemprop=["']image["'][^>]*content=["']([^"']+)["']"#,
    ])
});

static SITE_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)<meta[^>]*property=["']og:site_name["'][^>]*content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*property=["']og:site_name["']"#,
        r#"(?i)<meta[^>]*name=["']twitter:site["'][^>]*content=["']@?([^"']+)["']"#,
        r#"(?i)<meta[^>]*name=["']application-name["'][^>]*content=["']([^"']+)["']"#,
    ])
});

/// Page title: `og:title`, `twitter:title`, Amazon's `#productTitle`, then `<title>`.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    first_decoded_capture(&TITLE_PATTERNS, html)
}

/// Representative image, made absolute against `base_url`.
///
/// Protocol-relative URLs get `https:`; root-relative paths get the origin
/// of `base_url`. Anything else is returned as found.
#[must_use]
pub fn extract_image(html: &str, base_url: &str) -> Option<String> {
    first_capture(&IMAGE_PATTERNS, html).map(|raw| absolutize_image_url(raw, base_url))
}

fn absolutize_image_url(candidate: &str, base_url: &str) -> String {
    if let Some(rest) = candidate.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if candidate.starts_with('/') {
        if let Ok(base) = reqwest::Url::parse(base_url) {
            return format!("{}{candidate}", base.origin().ascii_serialization());
        }
        tracing::debug!(base_url, candidate, "cannot absolutize image path against unparseable base");
    }
    candidate.to_owned()
}

/// Site name from meta tags, falling back to the host without `www.`.
///
/// Always returns something: `"Unknown"` when even the URL cannot be parsed.
#[must_use]
pub fn extract_site_name(html: &str, url: &str) -> String {
    if let Some(name) = first_decoded_capture(&SITE_NAME_PATTERNS, html) {
        return name;
    }

    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .map_or_else(
            || "Unknown".to_string(),
            |host| host.strip_prefix("www.").map_or(host.clone(), str::to_owned),
        )
}
