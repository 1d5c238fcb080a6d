use crate::app_config::{AmazonCredentials, AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `AMAZON_SECRET_KEY=` in a `.env` file
    // disables the vendor path instead of signing with an empty key.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let bind_addr = {
        let raw = or_default("WISHLINK_BIND_ADDR", "0.0.0.0:3000");
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "WISHLINK_BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?
    };

    let fetch_timeout_secs = {
        let raw = or_default("WISHLINK_FETCH_TIMEOUT_SECS", "10");
        match raw.parse::<u64>() {
            Ok(0) => {
                return Err(ConfigError::InvalidEnvVar {
                    var: "WISHLINK_FETCH_TIMEOUT_SECS".to_string(),
                    reason: "timeout must be at least 1 second".to_string(),
                })
            }
            Ok(secs) => secs,
            Err(e) => {
                return Err(ConfigError::InvalidEnvVar {
                    var: "WISHLINK_FETCH_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    };

    let env = parse_environment(&or_default("WISHLINK_ENV", "development"))?;
    let log_level = or_default("WISHLINK_LOG_LEVEL", "info");
    let user_agent = or_default("WISHLINK_USER_AGENT", DEFAULT_USER_AGENT);

    let amazon = AmazonCredentials {
        access_key: optional("AMAZON_ACCESS_KEY"),
        secret_key: optional("AMAZON_SECRET_KEY"),
        partner_tag: optional("AMAZON_ASSOCIATE_TAG"),
    };

    let api_keys = or_default("WISHLINK_API_KEYS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch_timeout_secs,
        user_agent,
        amazon,
        api_keys,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WISHLINK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
