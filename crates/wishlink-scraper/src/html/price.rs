//! Price extraction: schema.org JSON-LD first, then meta tags and markup.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::compile_patterns;

static JSON_LD_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type=["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)<meta[^>]*itemprop=["']price["'][^>]*content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*property=["']og:price:amount["'][^>]*content=["']([^"']+)["']"#,
        r#"(?i)<meta[^>]*property=["']product:price:amount["'][^>]*content=["']([^"']+)["']"#,
        // Amazon apex price, then the legacy price blocks
        r#"(?i)<span[^>]*class=["'][^"']*a-price-whole[^"']*["'][^>]*>([^<]+)"#,
        r#"(?i)<span[^>]*id=["']priceblock_ourprice["'][^>]*>([^<]+)"#,
        r#"(?i)<span[^>]*id=["']priceblock_dealprice["'][^>]*>([^<]+)"#,
        r#"(?i)<span[^>]*id=["']priceblock_saleprice["'][^>]*>([^<]+)"#,
        r#"(?i)<[^>]*class=["'][^"']*price[^"']*["'][^>]*>\s*(\$[\d,]+\.?\d*)"#,
        r#"(?i)data-price=["'](\$?[\d,]+\.?\d*)["']"#,
    ])
});

static BARE_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d,]+\.?\d*$").expect("valid bare amount regex"));
static DOLLAR_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d,]+\.?\d*").expect("valid dollar amount regex"));

/// Best price on the page as a display string.
///
/// JSON-LD prices are reformatted to `$X.XX`. Markup prices are kept as
/// written (whitespace removed, `$` added to bare numbers) and only
/// accepted when they contain a `$` amount.
#[must_use]
pub fn extract_price(html: &str) -> Option<String> {
    if let Some(price) = extract_json_ld_price(html) {
        return Some(price);
    }

    PRICE_PATTERNS.iter().find_map(|re| {
        let raw = re.captures(html)?.get(1)?.as_str();
        clean_markup_price(raw)
    })
}

fn clean_markup_price(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let price = if BARE_AMOUNT_RE.is_match(&compact) {
        format!("${compact}")
    } else {
        compact
    };
    DOLLAR_AMOUNT_RE.is_match(&price).then_some(price)
}

fn extract_json_ld_price(html: &str) -> Option<String> {
    for cap in JSON_LD_SCRIPT_RE.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            tracing::debug!("skipping unparseable JSON-LD block");
            continue;
        };
        if let Some(amount) = find_price(&value).as_deref().and_then(leading_number) {
            return Some(format!("${}", to_cents_string(amount)));
        }
    }
    None
}

/// Non-empty string or non-zero number, rendered as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`scalar_text`], but `0` is a real price here (free tier, sale floor).
fn low_price_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => scalar_text(other),
    }
}

/// Depth-first search for a price in a JSON-LD value.
///
/// Per object: `price` (a scalar, or a `{price}`/`{value}` object), then
/// `offers`, then `lowPrice` (`AggregateOffer`), then `@graph`.
fn find_price(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(find_price),
        Value::Object(map) => {
            let direct = map.get("price").and_then(|price| match price {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Object(inner) => inner
                    .get("price")
                    .and_then(scalar_text)
                    .or_else(|| inner.get("value").and_then(scalar_text)),
                _ => None,
            });

            direct
                .or_else(|| map.get("offers").and_then(find_price))
                .or_else(|| map.get("lowPrice").and_then(low_price_text))
                .or_else(|| map.get("@graph").and_then(find_price))
        }
        _ => None,
    }
}

/// Two-decimal rendering of a non-negative amount.
///
/// Exact halfway values (only possible for odd multiples of 1/8) round up;
/// everything else rounds to the nearest cent of the exact binary value, so
/// `1.005` stays `1.00` because it is stored as `1.00499…`.
fn to_cents_string(amount: f64) -> String {
    let eighths = amount * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (amount * 100.0).ceil();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{amount:.2}")
}

/// Parses the leading decimal number after dropping everything but digits
/// and dots, so `"USD 1,299.00"` reads as `1299.0` and `"1.2.3"` as `1.2`.
fn leading_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = idx + 1;
    }

    cleaned[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_ld(body: &str) -> String {
        format!(r#"<script type="application/ld+json">{body}</script>"#)
    }

    #[test]
    fn json_ld_offer_price_is_formatted() {
        let html = json_ld(r#"{"@type":"Product","offers":{"price":"19.9"}}"#);
        assert_eq!(extract_price(&html).as_deref(), Some("$19.90"));
    }

    #[test]
    fn json_ld_numeric_price_is_formatted() {
        let html = json_ld(r#"{"@type":"Product","offers":[{"@type":"Offer","price":25}]}"#);
        assert_eq!(extract_price(&html).as_deref(), Some("$25.00"));
    }

    #[test]
    fn json_ld_price_specification_object() {
        let html = json_ld(r#"{"offers":{"price":{"value":"7.5","currency":"USD"}}}"#);
        assert_eq!(extract_price(&html).as_deref(), Some("$7.50"));
    }

    #[test]
    fn json_ld_aggregate_offer_low_price() {
        let html = json_ld(
            r#"{"@type":"Product","offers":{"@type":"AggregateOffer","lowPrice":"12","highPrice":"30"}}"#,
        );
        assert_eq!(extract_price(&html).as_deref(), Some("$12.00"));
    }

    #[test]
    fn json_ld_graph_container() {
        let html = json_ld(
            r#"{"@context":"https://schema.org","@graph":[{"@type":"WebPage"},{"@type":"Product","offers":{"price":"1,299.00"}}]}"#,
        );
        assert_eq!(extract_price(&html).as_deref(), Some("$1299.00"));
    }

    #[test]
    fn malformed_json_ld_block_is_skipped() {
        let html = format!(
            "{}{}",
            json_ld("{ not json"),
            json_ld(r#"{"offers":{"price":"3.1"}}"#)
        );
        assert_eq!(extract_price(&html).as_deref(), Some("$3.10"));
    }

    #[test]
    fn json_ld_without_price_falls_through_to_markup() {
        let html = format!(
            r#"{}<div data-price="29.99"></div>"#,
            json_ld(r#"{"@type":"Organization","name":"Shop"}"#)
        );
        assert_eq!(extract_price(&html).as_deref(), Some("$29.99"));
    }

    #[test]
    fn data_price_attribute_without_json_ld() {
        let html = r#"<div class="product" data-price="29.99">Blanket</div>"#;
        assert_eq!(extract_price(html).as_deref(), Some("$29.99"));
    }

    #[test]
    fn json_ld_wins_over_css_price_text() {
        let html = format!(
            r#"<span class="sale-price">$5.00</span>{}"#,
            json_ld(r#"{"offers":{"price":"19.9"}}"#)
        );
        assert_eq!(extract_price(&html).as_deref(), Some("$19.90"));
    }

    #[test]
    fn itemprop_meta_price_gets_dollar_prefix() {
        let html = r#"<meta itemprop="price" content="45.00">"#;
        assert_eq!(extract_price(html).as_deref(), Some("$45.00"));
    }

    #[test]
    fn og_price_amount_meta() {
        let html = r#"<meta property="og:price:amount" content="1,050">"#;
        assert_eq!(extract_price(html).as_deref(), Some("$1,050"));
    }

    #[test]
    fn amazon_apex_whole_price() {
        let html = r#"<span class="a-price-whole">129<span class="a-price-decimal">.</span></span>"#;
        assert_eq!(extract_price(html).as_deref(), Some("$129"));
    }

    #[test]
    fn amazon_priceblock_with_inner_whitespace() {
        let html = r#"<span id="priceblock_dealprice" class="a-size-medium">$ 19.99 </span>"#;
        assert_eq!(extract_price(html).as_deref(), Some("$19.99"));
    }

    #[test]
    fn non_price_meta_is_rejected_and_search_continues() {
        let html = r#"
            <meta itemprop="price" content="Call for price">
            <span class="price">$8.25</span>
        "#;
        assert_eq!(extract_price(html).as_deref(), Some("$8.25"));
    }

    #[test]
    fn no_price_anywhere() {
        assert_eq!(extract_price("<html><body>Sold out</body></html>"), None);
    }

    #[test]
    fn json_ld_halfway_cent_rounds_up() {
        for (raw, expected) in [
            ("0.125", "$0.13"),
            ("0.375", "$0.38"),
            ("3.875", "$3.88"),
            ("1.005", "$1.00"),
            ("2.675", "$2.67"),
            ("19.995", "$20.00"),
            ("2.5", "$2.50"),
        ] {
            let html = json_ld(&format!(r#"{{"offers":{{"price":"{raw}"}}}}"#));
            assert_eq!(extract_price(&html).as_deref(), Some(expected), "price {raw}");
        }
    }

    #[test]
    fn json_ld_zero_low_price_is_kept() {
        let html = json_ld(r#"{"offers":{"@type":"AggregateOffer","lowPrice":0,"highPrice":10}}"#);
        assert_eq!(extract_price(&html).as_deref(), Some("$0.00"));
    }

    #[test]
    fn leading_number_mimics_lenient_parsing() {
        assert_eq!(leading_number("19.9"), Some(19.9));
        assert_eq!(leading_number("USD 1,299.00"), Some(1299.0));
        assert_eq!(leading_number("1.2.3"), Some(1.2));
        assert_eq!(leading_number("free"), None);
        assert_eq!(leading_number("."), None);
    }
}
