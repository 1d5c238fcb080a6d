mod app_config;
mod config;
mod metadata;

pub use app_config::{AmazonCredentials, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use metadata::UrlMetadata;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
