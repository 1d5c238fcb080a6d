use serde::{Deserialize, Serialize};

/// Best-effort description of a product link.
///
/// `url` is always populated: it is the link the caller should store, which
/// may differ from the input (resolved short link, canonical affiliate URL).
/// Every other field is independently optional; an all-`None` value is a
/// valid result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadata {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub url: String,
}

impl UrlMetadata {
    /// A result carrying only the link, used whenever extraction degrades completely.
    #[must_use]
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            title: None,
            site_name: None,
            image_url: None,
            price: None,
            url: url.into(),
        }
    }

    /// `true` when nothing beyond the link itself was extracted.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.title.is_none()
            && self.site_name.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
    }
}
