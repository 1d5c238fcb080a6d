//! Integration tests for `AmazonClient` against a mock PA-API endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wishlink_core::AmazonCredentials;
use wishlink_scraper::{AmazonClient, VendorProductInfo};

fn credentials() -> AmazonCredentials {
    AmazonCredentials {
        access_key: Some("AKIDEXAMPLE".to_string()),
        secret_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string()),
        partner_tag: Some("mytag-20".to_string()),
    }
}

fn get_items_mock() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .and(header(
            "x-amz-target",
            "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems",
        ))
        .and(header("content-encoding", "amz-1.0"))
        .and(header_exists("x-amz-date"))
        .and(header_exists("authorization"))
}

fn full_item() -> serde_json::Value {
    json!({
        "ItemsResult": {
            "Items": [{
                "ASIN": "B08N5WRWNW",
                "DetailPageURL": "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20&linkCode=ogi",
                "ItemInfo": { "Title": { "DisplayValue": "Echo Dot (4th Gen)", "Label": "Title" } },
                "Images": { "Primary": { "Large": {
                    "URL": "https://m.media-amazon.com/images/I/echo.jpg",
                    "Height": 500,
                    "Width": 500
                } } },
                "Offers": { "Listings": [{
                    "Id": "abc",
                    "Price": { "Amount": 49.99, "Currency": "USD", "DisplayAmount": "$49.99" }
                }] }
            }]
        }
    })
}

#[tokio::test]
async fn get_items_success_maps_title_image_and_price() {
    let server = MockServer::start().await;
    get_items_mock()
        .and(body_partial_json(json!({
            "ItemIds": ["B08N5WRWNW"],
            "PartnerTag": "mytag-20",
            "PartnerType": "Associates"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_item()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    let info = client.fetch_product_info("B08N5WRWNW").await;

    assert_eq!(
        info,
        Some(VendorProductInfo {
            title: Some("Echo Dot (4th Gen)".to_string()),
            image_url: Some("https://m.media-amazon.com/images/I/echo.jpg".to_string()),
            price: Some("$49.99".to_string()),
            canonical_url: "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20".to_string(),
        })
    );
}

#[tokio::test]
async fn authorization_header_names_all_signed_headers() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(full_item()))
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    client.fetch_product_info("B08N5WRWNW").await;

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(auth.contains("/us-east-1/ProductAdvertisingAPI/aws4_request"));
    assert!(auth.contains(
        "SignedHeaders=content-encoding;content-type;host;x-amz-date;x-amz-target"
    ));
}

#[tokio::test]
async fn missing_optional_fields_become_none() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemsResult": { "Items": [{ "ASIN": "B08N5WRWNW" }] }
        })))
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    let info = client.fetch_product_info("B08N5WRWNW").await.unwrap();

    assert_eq!(info.title, None);
    assert_eq!(info.image_url, None);
    assert_eq!(info.price, None);
    assert_eq!(
        info.canonical_url,
        "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20"
    );
}

#[tokio::test]
async fn non_2xx_returns_none() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "Errors": [{ "Code": "TooManyRequests", "Message": "throttled" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    assert!(client.fetch_product_info("B08N5WRWNW").await.is_none());
}

#[tokio::test]
async fn empty_items_returns_none() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ItemsResult": { "Items": [] }
        })))
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    assert!(client.fetch_product_info("B08N5WRWNW").await.is_none());
}

#[tokio::test]
async fn errors_only_body_returns_none() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Errors": [{ "Code": "InvalidParameterValue", "Message": "bad ASIN" }]
        })))
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    assert!(client.fetch_product_info("B000000000").await.is_none());
}

#[tokio::test]
async fn malformed_body_returns_none() {
    let server = MockServer::start().await;
    get_items_mock()
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = AmazonClient::with_endpoint(credentials(), 5, &server.uri()).unwrap();
    assert!(client.fetch_product_info("B08N5WRWNW").await.is_none());
}

#[tokio::test]
async fn incomplete_credentials_never_call_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_item()))
        .expect(0)
        .mount(&server)
        .await;

    let creds = AmazonCredentials {
        secret_key: None,
        ..credentials()
    };
    let client = AmazonClient::with_endpoint(creds, 5, &server.uri()).unwrap();
    assert!(client.fetch_product_info("B08N5WRWNW").await.is_none());
}
