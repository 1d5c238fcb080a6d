//! Wire types for the PA-API 5.0 `GetItems` operation.
//!
//! Only the resources requested by [`super::AmazonClient`] are modelled;
//! everything is optional because PA-API omits whole branches when an item
//! lacks the data.

use serde::{Deserialize, Serialize};

pub(super) const RESOURCES: [&str; 3] = [
    "ItemInfo.Title",
    "Images.Primary.Large",
    "Offers.Listings.Price",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetItemsRequest<'a> {
    pub item_ids: [&'a str; 1],
    pub partner_tag: &'a str,
    pub partner_type: &'a str,
    pub resources: [&'a str; 3],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetItemsResponse {
    pub items_result: Option<ItemsResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ItemsResult {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Item {
    pub item_info: Option<ItemInfo>,
    pub images: Option<Images>,
    pub offers: Option<Offers>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ItemInfo {
    pub title: Option<DisplayValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DisplayValue {
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Images {
    pub primary: Option<PrimaryImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct PrimaryImage {
    pub large: Option<ImageSize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageSize {
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Offers {
    #[serde(default)]
    pub listings: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Listing {
    pub price: Option<ListingPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListingPrice {
    pub display_amount: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Item {
    pub(super) fn title(&self) -> Option<String> {
        non_empty(
            self.item_info
                .as_ref()
                .and_then(|info| info.title.as_ref())
                .and_then(|t| t.display_value.clone()),
        )
    }

    pub(super) fn image_url(&self) -> Option<String> {
        non_empty(
            self.images
                .as_ref()
                .and_then(|i| i.primary.as_ref())
                .and_then(|p| p.large.as_ref())
                .and_then(|l| l.url.clone()),
        )
    }

    pub(super) fn display_price(&self) -> Option<String> {
        non_empty(
            self.offers
                .as_ref()
                .and_then(|o| o.listings.first())
                .and_then(|l| l.price.as_ref())
                .and_then(|p| p.display_amount.clone()),
        )
    }
}
