//! URL-safe identifiers derived from display names

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());

/// Turn a display name into a slug.
///
/// Lowercases and trims the text, drops everything that is not an ASCII
/// letter, digit, whitespace or hyphen, then collapses each run of
/// whitespace and hyphens into a single `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED.replace_all(lowered.trim(), "");
    SEPARATORS.replace_all(&kept, "-").into_owned()
}
