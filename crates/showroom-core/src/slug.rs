use regex::Regex;
use std::sync::OnceLock;

static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();

fn non_alnum_re() -> &'static Regex {
    NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Derive a URL-safe folder slug from a free-text company name.
///
/// Lowercases, spells out `&` as "and", collapses every other non-alphanumeric
/// run into a single hyphen, and trims hyphens from both ends. An input with
/// no usable characters yields "company".
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('&', " and ");
    let hyphenated = non_alnum_re().replace_all(&lowered, "-");
    let trimmed = hyphenated.trim_matches('-');
    if trimmed.is_empty() {
        "company".to_string()
    } else {
        trimmed.to_string()
    }
}
