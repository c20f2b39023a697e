//! Address strings as the backends expect them: `"<line>, <City>, <POSTCODE>, UK"`.

use std::sync::LazyLock;

use regex::Regex;

static UK_POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}\b").expect("valid regex")
});
static TRAILING_UK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,\s]*\bUK\s*,?\s*$").expect("valid regex"));

/// Returns `true` if `s` contains a token shaped like a UK postcode.
#[must_use]
pub fn contains_uk_postcode(s: &str) -> bool {
    UK_POSTCODE_RE.is_match(s)
}

fn strip_trailing_uk(s: &str) -> &str {
    match TRAILING_UK_RE.find(s) {
        Some(m) => s[..m.start()].trim_end(),
        None => s.trim_end(),
    }
}

/// Appends `postcode` and the `UK` suffix to a free-text address.
///
/// A trailing `UK` is removed before being re-appended, and the postcode is
/// only added when the address carries no postcode-shaped token already, so
/// applying this twice changes nothing.
#[must_use]
pub fn format_address_with_postcode(address: &str, postcode: &str) -> String {
    let base = strip_trailing_uk(address.trim());
    let postcode = postcode.trim().to_uppercase();

    let mut out = base.to_owned();
    if !postcode.is_empty() && !contains_uk_postcode(base) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&postcode);
    }
    if out.is_empty() {
        return String::new();
    }
    out.push_str(", UK");
    out
}

/// Builds `"<line>, <City>, <POSTCODE>, UK"` from address parts, skipping empty ones.
#[must_use]
pub fn compose_address(line: &str, city: Option<&str>, postcode: Option<&str>) -> String {
    let line = strip_trailing_uk(line.trim());
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if !line.is_empty() {
        parts.push(line.to_owned());
    }
    if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
        if !line.to_lowercase().contains(&city.to_lowercase()) {
            parts.push(city.to_owned());
        }
    }
    if let Some(pc) = postcode.map(str::trim).filter(|p| !p.is_empty()) {
        if !contains_uk_postcode(line) {
            parts.push(pc.to_uppercase());
        }
    }
    if parts.is_empty() {
        return String::new();
    }
    parts.push("UK".to_owned());
    parts.join(", ")
}
