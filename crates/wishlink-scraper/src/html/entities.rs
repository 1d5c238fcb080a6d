use std::sync::LazyLock;

use regex::{Captures, Regex};

static DECIMAL_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").expect("valid decimal entity regex"));
static HEX_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#x([a-fA-F0-9]+);").expect("valid hex entity regex"));

/// Named entities, replaced in this order. `&amp;` goes first, so a doubly
/// encoded `&amp;quot;` comes out as `"` rather than `&quot;`.
const NAMED_ENTITIES: [(&str, &str); 8] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
    ("&nbsp;", " "),
];

fn replace_char_refs(text: &str, re: &Regex, radix: u32) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        u32::from_str_radix(&caps[1], radix)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    })
    .into_owned()
}

/// Decodes the handful of entities that show up in titles and site names.
///
/// A single ordered pass: the named entities, then decimal references,
/// then hex references. References that do not name a valid code point are
/// left as-is.
#[must_use]
pub fn decode_html_entities(text: &str) -> String {
    let named = NAMED_ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        });
    let decimal = replace_char_refs(&named, &DECIMAL_REF_RE, 10);
    replace_char_refs(&decimal, &HEX_REF_RE, 16)
}
