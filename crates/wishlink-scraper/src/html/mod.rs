//! Generic HTML scraping: fetch a page and pull title, image, price and
//! site name out of it with ordered regex heuristics.
//!
//! Each field has a static pattern table, most authoritative source first
//! (structured data, then social meta tags, then Amazon's own markup, then
//! generic fallbacks). The first pattern producing a non-empty capture wins.

mod entities;
mod extract;
mod fetch;
mod price;

use regex::Regex;

pub use entities::decode_html_entities;
pub use extract::{extract_image, extract_site_name, extract_title};
pub use fetch::fetch_html;
pub use price::extract_price;

fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid extraction pattern"))
        .collect()
}

/// Trimmed first capture group of the first pattern that yields a non-empty one.
fn first_capture<'h>(patterns: &[Regex], html: &'h str) -> Option<&'h str> {
    patterns.iter().find_map(|re| {
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    })
}

/// Like [`first_capture`], but entity-decoded; a capture that decodes to
/// whitespace (`&nbsp;`) does not stop the search.
fn first_decoded_capture(patterns: &[Regex], html: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let raw = re.captures(html)?.get(1)?.as_str();
        let decoded = decode_html_entities(raw.trim());
        let decoded = decoded.trim();
        (!decoded.is_empty()).then(|| decoded.to_owned())
    })
}
