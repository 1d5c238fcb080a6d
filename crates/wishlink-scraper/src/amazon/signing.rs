//! AWS Signature Version 4 for Product Advertising API `GetItems` calls.
//!
//! Only the subset PA-API needs is implemented: a `POST` with an empty query
//! string and a fixed set of five signed headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::ScraperError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub(super) const CONTENT_ENCODING: &str = "amz-1.0";
pub(super) const CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub(super) const GET_ITEMS_TARGET: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems";
const SIGNED_HEADERS: &str = "content-encoding;content-type;host;x-amz-date;x-amz-target";

/// Inputs that stay fixed for one client.
pub(super) struct SigningKey<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub host: &'a str,
    pub region: &'a str,
    pub service: &'a str,
}

/// Headers to attach to the outgoing request, in addition to the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

fn hmac(key: &[u8], data: &str) -> Result<Vec<u8>, ScraperError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ScraperError::Signing(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, ScraperError> {
    let k_date = hmac(format!("AWS4{secret_key}").as_bytes(), date_stamp)?;
    let k_region = hmac(&k_date, region)?;
    let k_service = hmac(&k_region, service)?;
    hmac(&k_service, "aws4_request")
}

fn canonical_request(method: &str, path: &str, host: &str, amz_date: &str, payload: &str) -> String {
    let canonical_headers = format!(
        "content-encoding:{CONTENT_ENCODING}\n\
         content-type:{CONTENT_TYPE}\n\
         host:{host}\n\
         x-amz-date:{amz_date}\n\
         x-amz-target:{GET_ITEMS_TARGET}"
    );
    let payload_hash = sha256_hex(payload.as_bytes());

    // Empty query string, then a blank line terminating the header block.
    [
        method,
        path,
        "",
        &canonical_headers,
        "",
        SIGNED_HEADERS,
        &payload_hash,
    ]
    .join("\n")
}

/// Signs one request. The timestamp is truncated to the second, so a fresh
/// signature is needed for every call.
///
/// # Errors
///
/// Returns [`ScraperError::Signing`] if the HMAC key cannot be initialised.
pub(super) fn sign_request(
    key: &SigningKey<'_>,
    method: &str,
    path: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, ScraperError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();

    let canonical = canonical_request(method, path, key.host, &amz_date, payload);
    let credential_scope = format!(
        "{date_stamp}/{}/{}/aws4_request",
        key.region, key.service
    );
    let string_to_sign = [
        ALGORITHM,
        &amz_date,
        &credential_scope,
        &sha256_hex(canonical.as_bytes()),
    ]
    .join("\n");

    let signing_key = derive_signing_key(key.secret_key, &date_stamp, key.region, key.service)?;
    let signature: String = hmac(&signing_key, &string_to_sign)?
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();

    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        key.access_key
    );

    Ok(SignedHeaders {
        amz_date,
        authorization,
    })
}
