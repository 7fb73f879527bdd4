//! Address simplification for the second lookup attempt.
//!
//! Removes the parts of an address that providers rarely index: unit and
//! apartment designators, floor indicators and "No." number prefixes.

use std::sync::LazyLock;

use regex::Regex;

static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:apt|apartment|unit|suite|ste)\b\.?\s*#?\s*(?:\d[\w-]*|[a-z]\b)").expect("unit pattern")
});

static HASH_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\s*\d[\w-]*").expect("hash unit pattern"));

static ORDINAL_FLOOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:st|nd|rd|th)\s+(?:floor|fl|level)\b\.?").expect("ordinal floor pattern")
});

static FLOOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:floor|level)\s*\d+\b").expect("floor pattern"));

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bno\.?\s*(\d)").expect("number prefix pattern"));

/// Strip unit, floor and number-prefix noise from `address`.
///
/// Returns the input, tidied, when there is nothing to strip.
pub fn simplify_address(address: &str) -> String {
    let stripped = UNIT.replace_all(address, "");
    let stripped = HASH_UNIT.replace_all(&stripped, "");
    let stripped = ORDINAL_FLOOR.replace_all(&stripped, "");
    let stripped = FLOOR.replace_all(&stripped, "");
    let stripped = NUMBER_PREFIX.replace_all(&stripped, "$1");

    stripped
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
