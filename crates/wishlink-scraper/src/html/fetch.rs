use std::time::Duration;

use crate::error::ScraperError;

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Fetches a page body with browser-like headers.
///
/// `timeout` bounds the whole exchange, body included. Returns `None` on
/// timeout, transport failure or a non-2xx status; the reason is logged.
pub async fn fetch_html(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Option<String> {
    let result = tokio::time::timeout(timeout, request_html(client, url, user_agent))
        .await
        .unwrap_or_else(|_| {
            Err(ScraperError::Timeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            })
        });

    match result {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(url, error = %e, "failed to fetch page");
            None
        }
    }
}

async fn request_html(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, ScraperError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(reqwest::header::ACCEPT, ACCEPT)
        .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}
