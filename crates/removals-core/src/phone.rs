use std::sync::LazyLock;

use regex::Regex;

static UK_MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+44|0044|0)7\d{9}$").expect("valid regex"));

/// Returns `true` if `phone` is a UK mobile number (`07…`, `+447…` or `00447…`).
///
/// Spaces, dashes, dots and parentheses are ignored.
#[must_use]
pub fn is_valid_uk_mobile(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    UK_MOBILE_RE.is_match(&compact)
}
