/// Product data returned by a first-party vendor integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProductInfo {
    pub title: Option<String>,
    pub image_url: Option<String>,
    /// Vendor's own display string (e.g. `"$24.99"`), never reformatted.
    pub price: Option<String>,
    /// Clean product link carrying the affiliate tag.
    pub canonical_url: String,
}
