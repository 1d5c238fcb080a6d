pub mod amazon;
pub mod error;
pub mod html;
pub mod metadata;
pub mod resolver;
pub mod types;

pub use amazon::AmazonClient;
pub use error::ScraperError;
pub use metadata::{fetch_url_metadata, MetadataFetcher, VendorIntegration};
pub use types::VendorProductInfo;
pub use wishlink_core::UrlMetadata;
